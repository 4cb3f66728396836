use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Mat4;
use shared::Locator;

use super::{AssetDecoder, LoadError, ProgressSink};
use crate::scene::{SceneGraph, SceneNode};
use crate::viewport::mesh::MeshData;

/// Share of the progress bar spent downloading
const DOWNLOAD_SHARE: f32 = 80.0;
const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Decodes glTF/GLB assets from http(s) URLs or local paths
#[derive(Clone, Default)]
pub struct GltfDecoder {
    client: reqwest::Client,
}

impl GltfDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Filesystem path for a local locator: a plain path or a `file://` URL
fn local_path(locator: &str) -> Result<PathBuf, LoadError> {
    if !locator.starts_with("file:") {
        return Ok(PathBuf::from(locator));
    }
    reqwest::Url::parse(locator)
        .ok()
        .and_then(|url| url.to_file_path().ok())
        .ok_or_else(|| LoadError::Decode(format!("Invalid file URL: {locator}")))
}

impl AssetDecoder for GltfDecoder {
    fn decode(
        &self,
        locator: Locator,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<SceneGraph, LoadError>> + Send {
        let client = self.client.clone();
        async move {
            let (document, buffers, _images) = if is_remote(&locator) {
                let bytes = fetch(&client, &locator, &progress).await?;
                tokio::task::spawn_blocking(move || gltf::import_slice(&bytes)).await??
            } else {
                let path = local_path(&locator)?;
                // Surface "not found" as an IO error rather than a decode error
                tokio::fs::metadata(&path).await?;
                progress.report(DOWNLOAD_SHARE);
                tokio::task::spawn_blocking(move || gltf::import(path)).await??
            };
            progress.report(95.0);
            Ok(scene_from_document(&document, &buffers))
        }
    }
}

async fn fetch(
    client: &reqwest::Client,
    locator: &str,
    progress: &ProgressSink,
) -> Result<Vec<u8>, LoadError> {
    let mut response = client.get(locator).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            status: status.as_u16(),
            locator: locator.to_string(),
        });
    }

    let total = response.content_length().filter(|t| *t > 0);
    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    while let Some(chunk) = response.chunk().await? {
        bytes.extend_from_slice(&chunk);
        if let Some(total) = total {
            progress.report(DOWNLOAD_SHARE * bytes.len() as f32 / total as f32);
        }
    }
    tracing::debug!("Fetched {} bytes from {}", bytes.len(), locator);
    Ok(bytes)
}

/// Build a scene graph from the default scene (or the first one)
pub fn scene_from_document(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> SceneGraph {
    let scene = document.default_scene().or_else(|| document.scenes().next());
    let roots = scene
        .map(|s| s.nodes().map(|n| convert_node(&n, buffers)).collect())
        .unwrap_or_default();
    SceneGraph::new(roots)
}

fn convert_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> SceneNode {
    let mesh = node
        .mesh()
        .map(|m| convert_mesh(&m, buffers))
        .filter(|m| m.vertex_count() > 0)
        .map(Arc::new);

    SceneNode {
        name: node.name().map(str::to_string),
        transform: Mat4::from_cols_array_2d(&node.transform().matrix()),
        mesh,
        cast_shadow: false,
        receive_shadow: false,
        children: node.children().map(|c| convert_node(&c, buffers)).collect(),
    }
}

fn convert_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> MeshData {
    let mut out = MeshData::default();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| &d.0[..]));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = positions.collect();
        let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
        let indices = reader.read_indices().map(|i| i.into_u32().collect());

        let [r, g, b, _] = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();
        let color = if primitive.material().index().is_some() {
            [r, g, b]
        } else {
            DEFAULT_COLOR
        };

        let part = MeshData::from_attributes(&positions, normals.as_deref(), indices, color);
        out.append(&part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal embedded glTF: one triangle under a translated node
    fn triangle_gltf() -> Vec<u8> {
        use base64::{engine::general_purpose, Engine as _};
        use std::io::Write;

        let mut buffer = Vec::new();
        for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]] {
            for c in p {
                buffer.write_all(&c.to_le_bytes()).unwrap();
            }
        }
        let b64 = general_purpose::STANDARD.encode(&buffer);

        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "name": "tri", "mesh": 0, "translation": [0.0, 1.0, 0.0] }}],
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }} }}] }}],
  "accessors": [{{
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0.0, 0.0, 0.0], "max": [1.0, 2.0, 0.0]
  }}],
  "bufferViews": [{{ "buffer": 0, "byteLength": 36 }}],
  "buffers": [{{ "byteLength": 36, "uri": "data:application/octet-stream;base64,{b64}" }}]
}}"#
        )
        .into_bytes()
    }

    #[test]
    fn test_local_path_accepts_file_urls() {
        assert_eq!(local_path("models/a.glb").unwrap(), PathBuf::from("models/a.glb"));
        assert_eq!(
            local_path("file:///tmp/models/a%20b.glb").unwrap(),
            PathBuf::from("/tmp/models/a b.glb")
        );
        assert!(matches!(local_path("file://other-host/a.glb"), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_file_url_loads_like_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.gltf");
        std::fs::write(&path, triangle_gltf()).unwrap();
        let url = reqwest::Url::from_file_path(&path).unwrap();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let scene = rt
            .block_on(GltfDecoder::new().decode(url.to_string(), ProgressSink::detached()))
            .unwrap();
        assert_eq!(scene.mesh_count(), 1);
    }

    #[test]
    fn test_embedded_gltf_becomes_scene_graph() {
        let (document, buffers, _) = gltf::import_slice(triangle_gltf()).unwrap();
        let scene = scene_from_document(&document, &buffers);

        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.roots[0].name.as_deref(), Some("tri"));

        let aabb = scene.bounding_box();
        assert_eq!(aabb.min, glam::Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(aabb.max, glam::Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(
            GltfDecoder::new().decode("/nonexistent/model.glb".to_string(), ProgressSink::detached()),
        );
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(gltf::import_slice(b"not a model").is_err());
    }
}
