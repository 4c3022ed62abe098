//! WebGL presenter
//!
//! Uploads the scene's triangle list each frame and draws it in one call.
//! Positions are logical screen pixels; the vertex shader maps them to clip
//! space using the logical screen size.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader,
    WebGlUniformLocation,
};

use super::vertex::{Vertex, as_bytes};

const VERTEX_SHADER: &str = r#"
attribute vec2 a_position;
attribute vec4 a_color;
uniform vec2 u_screen;
varying vec4 v_color;
void main() {
    vec2 clip = (a_position / u_screen) * 2.0 - 1.0;
    gl_Position = vec4(clip.x, -clip.y, 0.0, 1.0);
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
varying vec4 v_color;
void main() {
    gl_FragColor = v_color;
}
"#;

/// Main render state
pub struct WebGlPresenter {
    gl: Gl,
    program: WebGlProgram,
    buffer: WebGlBuffer,
    screen_loc: Option<WebGlUniformLocation>,
    position_loc: u32,
    color_loc: u32,
    /// Viewport size in device pixels
    pub size: (u32, u32),
}

impl WebGlPresenter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl = canvas
            .get_context("webgl")?
            .ok_or_else(|| JsValue::from_str("WebGL not available"))?
            .dyn_into::<Gl>()?;

        let vs = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vs, &fs)?;

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("Failed to create vertex buffer"))?;

        let position_loc = attrib_location(&gl, &program, "a_position")?;
        let color_loc = attrib_location(&gl, &program, "a_color")?;
        let screen_loc = gl.get_uniform_location(&program, "u_screen");

        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);

        log::info!("WebGL presenter ready");

        Ok(Self {
            gl,
            program,
            buffer,
            screen_loc,
            position_loc,
            color_loc,
            size: (canvas.width(), canvas.height()),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Draw one frame; `screen` is the logical playfield size
    pub fn draw(&self, vertices: &[Vertex], screen: (f32, f32)) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.size.0 as i32, self.size.1 as i32);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        if vertices.is_empty() {
            return;
        }

        gl.use_program(Some(&self.program));
        gl.uniform2f(self.screen_loc.as_ref(), screen.0, screen.1);

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.buffer));
        gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, as_bytes(vertices), Gl::DYNAMIC_DRAW);

        let stride = Vertex::STRIDE as i32;
        gl.vertex_attrib_pointer_with_i32(self.position_loc, 2, Gl::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(self.position_loc);
        gl.vertex_attrib_pointer_with_i32(
            self.color_loc,
            4,
            Gl::FLOAT,
            false,
            stride,
            Vertex::COLOR_OFFSET as i32,
        );
        gl.enable_vertex_attrib_array(self.color_loc);

        gl.draw_arrays(Gl::TRIANGLES, 0, vertices.len() as i32);
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("Failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(JsValue::from_str(&format!("Shader compile failed: {}", info)))
    }
}

fn link_program(gl: &Gl, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("Failed to create program"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!("Program link failed: {}", info)))
    }
}

fn attrib_location(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<u32, JsValue> {
    let loc = gl.get_attrib_location(program, name);
    if loc < 0 {
        Err(JsValue::from_str(&format!("Missing attribute {}", name)))
    } else {
        Ok(loc as u32)
    }
}
