use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;

use blueprint_viewer_lib::scene::{self, RenderItem};
use blueprint_viewer_lib::state::GridSettings;
use blueprint_viewer_lib::viewport::camera::OrbitCamera;
use blueprint_viewer_lib::viewport::lighting::{Environment, LightingRig};
use blueprint_viewer_lib::viewport::mesh::{self, LineMeshData, MeshData};

/// Grid sits slightly below the ground so it never z-fights with it
const GRID_Y: f32 = -0.01;
/// Shadows sit slightly above the ground
const SHADOW_Y: f32 = 0.002;
const SHADOW_ALPHA: f32 = 0.25;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    pub grid_visible: bool,
    pub environment: Environment,
    pub lighting: LightingRig,
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

/// Key of an uploaded mesh: address of its shared geometry
type MeshKey = usize;

fn mesh_key(mesh: &Arc<MeshData>) -> MeshKey {
    Arc::as_ptr(mesh) as usize
}

struct DrawItem {
    key: MeshKey,
    model: Mat4,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    shadow_program: glow::Program,
    grid: Option<GpuLines>,
    cached_grid: Option<GridSettings>,
    /// Uploaded geometry; the Arc keeps the key address alive
    meshes: HashMap<MeshKey, (Arc<MeshData>, GpuMesh)>,
    items: Vec<DrawItem>,
    /// Indices into `items` projected onto the ground
    shadow_casters: Vec<usize>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        tracing::debug!("Creating GL renderer");
        Self {
            mesh_program: compile_program(gl, MESH_VERT, MESH_FRAG),
            line_program: compile_program(gl, LINE_VERT, LINE_FRAG),
            shadow_program: compile_program(gl, SHADOW_VERT, SHADOW_FRAG),
            grid: None,
            cached_grid: None,
            meshes: HashMap::new(),
            items: Vec::new(),
            shadow_casters: Vec::new(),
        }
    }

    /// Rebuild the grid when its settings change
    pub fn update_grid(&mut self, gl: &glow::Context, settings: &GridSettings) {
        if self.cached_grid.as_ref() == Some(settings) {
            return;
        }
        if let Some(old) = self.grid.take() {
            delete_lines(gl, &old);
        }
        let data = mesh::grid(
            settings.cell_size,
            settings.section_size,
            settings.fade_distance,
            GRID_Y,
        );
        self.grid = Some(upload_lines(gl, &data));
        self.cached_grid = Some(settings.clone());
    }

    /// Upload new geometry, free geometry no longer drawn and record the
    /// draw list for this frame
    pub fn sync_items(&mut self, gl: &glow::Context, items: &[RenderItem]) {
        self.items.clear();
        for item in items {
            let key = mesh_key(&item.mesh);
            self.meshes
                .entry(key)
                .or_insert_with(|| (Arc::clone(&item.mesh), upload_mesh(gl, &item.mesh)));
            self.items.push(DrawItem {
                key,
                model: item.model,
            });
        }
        self.shadow_casters = scene::shadow_casters(items);

        let live: Vec<MeshKey> = self.items.iter().map(|i| i.key).collect();
        let stale: Vec<MeshKey> = self
            .meshes
            .keys()
            .filter(|k| !live.contains(k))
            .copied()
            .collect();
        for key in stale {
            if let Some((_, mesh)) = self.meshes.remove(&key) {
                delete_mesh(gl, &mesh);
            }
        }
    }

    /// Render the scene
    pub fn paint(&self, gl: &glow::Context, camera: &OrbitCamera, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3].max(1.0);
        let vp = camera.view_projection(aspect);
        let sky = params.environment.sky();
        let rig = &params.lighting;

        unsafe {
            let [x, y, w, h] = params.viewport.map(|v| v as i32);
            gl.viewport(x, y, w, h);
            gl.scissor(x, y, w, h);
            gl.enable(glow::SCISSOR_TEST);

            gl.clear_color(sky[0], sky[1], sky[2], 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            // Meshes
            gl.use_program(Some(self.mesh_program));
            let p = self.mesh_program;
            set_uniform_vec3(gl, p, "u_ambient", rig.ambient_color(params.environment));
            set_uniform_vec3(gl, p, "u_dir_light", -rig.directional.direction());
            set_uniform_f32(gl, p, "u_dir_intensity", rig.directional.intensity);
            set_uniform_vec3(gl, p, "u_point_pos", rig.point.position);
            set_uniform_f32(gl, p, "u_point_intensity", rig.point.intensity);
            for item in &self.items {
                if let Some((_, mesh)) = self.meshes.get(&item.key) {
                    set_uniform_mat4(gl, p, "u_mvp", &(vp * item.model));
                    set_uniform_mat4(gl, p, "u_model", &item.model);
                    draw_mesh(gl, mesh);
                }
            }

            // Planar shadows on the ground
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.depth_mask(false);
            gl.use_program(Some(self.shadow_program));
            set_uniform_f32(gl, self.shadow_program, "u_alpha", SHADOW_ALPHA);
            let flatten = rig.shadow_matrix(SHADOW_Y);
            for item in self.shadow_casters.iter().filter_map(|&i| self.items.get(i)) {
                if let Some((_, mesh)) = self.meshes.get(&item.key) {
                    set_uniform_mat4(gl, self.shadow_program, "u_mvp", &(vp * flatten * item.model));
                    draw_mesh(gl, mesh);
                }
            }

            // Grid
            if params.grid_visible {
                if let Some(ref grid) = self.grid {
                    gl.use_program(Some(self.line_program));
                    set_uniform_mat4(gl, self.line_program, "u_mvp", &vp);
                    draw_lines(gl, grid);
                }
            }
            gl.depth_mask(true);
            gl.disable(glow::BLEND);

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    /// Free every GL object owned by the renderer
    pub fn destroy(&mut self, gl: &glow::Context) {
        tracing::debug!("Destroying GL renderer ({} meshes)", self.meshes.len());
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
            gl.delete_program(self.shadow_program);
        }
        if let Some(grid) = self.grid.take() {
            delete_lines(gl, &grid);
        }
        for (_, (_, mesh)) in self.meshes.drain() {
            delete_mesh(gl, &mesh);
        }
        self.items.clear();
        self.shadow_casters.clear();
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> GpuMesh {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 9 * 4; // 9 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);
        // color: location 2
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * 4);

        let ibo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        }
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> GpuLines {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 7 * 4; // 7 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // color: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        GpuLines {
            vao,
            vbo,
            vertex_count: data.vertex_count() as i32,
        }
    }
}

fn delete_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh.vbo);
        gl.delete_buffer(mesh.ibo);
    }
}

fn delete_lines(gl: &glow::Context, lines: &GpuLines) {
    unsafe {
        gl.delete_vertex_array(lines.vao);
        gl.delete_buffer(lines.vbo);
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> glow::Program {
    unsafe {
        let program = gl.create_program().unwrap();

        let vert = gl.create_shader(glow::VERTEX_SHADER).unwrap();
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER).unwrap();
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
        }

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        program
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_world;
out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_world = (u_model * vec4(a_position, 1.0)).xyz;
    v_normal = mat3(u_model) * a_normal;
    v_color = a_color;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_ambient;
uniform vec3 u_dir_light;
uniform float u_dir_intensity;
uniform vec3 u_point_pos;
uniform float u_point_intensity;

in vec3 v_world;
in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    float dir = max(dot(n, normalize(u_dir_light)), 0.0) * u_dir_intensity;
    vec3 to_point = u_point_pos - v_world;
    float point = max(dot(n, normalize(to_point)), 0.0) * u_point_intensity;
    vec3 light = u_ambient + vec3(dir + point);
    frag_color = vec4(v_color * light, 1.0);
}
"#;

const SHADOW_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

const SHADOW_FRAG: &str = r#"#version 330 core
uniform float u_alpha;
out vec4 frag_color;

void main() {
    frag_color = vec4(0.0, 0.0, 0.0, u_alpha);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
