/// Traveler material instance.
///
/// A Material is a named set of shader parameters owned by one graphics
/// instance. The host engine reads the parameters when it draws the
/// traveler; only the clip-plane parameters are written by this crate.
///
/// Parameter names are bit-exact with the shader side:
/// - `_UseClipPlane` (int, 0 or 1)
/// - `_ClipPlaneCenter` (vec3, world position)
/// - `_ClipPlaneNormal` (vec3, world direction; the kept side)

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Enables the clip plane (int 0/1)
pub const USE_CLIP_PLANE: &str = "_UseClipPlane";
/// Point on the clip plane (vec3)
pub const CLIP_PLANE_CENTER: &str = "_ClipPlaneCenter";
/// Clip plane normal (vec3)
pub const CLIP_PLANE_NORMAL: &str = "_ClipPlaneNormal";

// ===== PARAMETER VALUES =====

/// A typed parameter value for the material
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Vec3([f32; 3]),
    Int(i32),
}

// ===== PACKED CLIP PLANE =====

/// Clip-plane parameters packed for a uniform buffer (two 16-byte rows).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ClipPlaneUniform {
    pub center: [f32; 3],
    pub use_clip_plane: i32,
    pub normal: [f32; 3],
    pub _padding: f32,
}

// ===== MATERIAL =====

/// Material instance: named parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    name: String,
    params: Vec<(String, ParamValue)>,
    param_names: FxHashMap<String, usize>,
}

impl Material {
    /// Create a material with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            param_names: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== PARAM ACCESS =====

    /// Set a parameter, replacing any previous value under `name`
    pub fn set_param(&mut self, name: &str, value: ParamValue) {
        match self.param_names.get(name) {
            Some(&index) => self.params[index].1 = value,
            None => {
                self.param_names.insert(name.to_string(), self.params.len());
                self.params.push((name.to_string(), value));
            }
        }
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set_param(name, ParamValue::Int(value));
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set_param(name, ParamValue::Vec3(value.to_array()));
    }

    /// Get parameter value by name
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        let idx = self.param_names.get(name)?;
        self.params.get(*idx).map(|(_, v)| v)
    }

    /// Get number of parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Integer parameter, `None` if missing or of another type
    pub fn int(&self, name: &str) -> Option<i32> {
        match self.param(name)? {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Vec3 parameter, `None` if missing or of another type
    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.param(name)? {
            ParamValue::Vec3(value) => Some(Vec3::from_array(*value)),
            _ => None,
        }
    }

    // ===== CLIP PLANE =====

    /// Whether the clip plane is enabled (missing parameter reads as off)
    pub fn clip_plane_enabled(&self) -> bool {
        self.int(USE_CLIP_PLANE).unwrap_or(0) != 0
    }

    /// Clip-plane parameters in their packed uniform layout
    pub fn clip_plane_uniform(&self) -> ClipPlaneUniform {
        ClipPlaneUniform {
            center: self.vec3(CLIP_PLANE_CENTER).unwrap_or(Vec3::ZERO).to_array(),
            use_clip_plane: self.int(USE_CLIP_PLANE).unwrap_or(0),
            normal: self.vec3(CLIP_PLANE_NORMAL).unwrap_or(Vec3::ZERO).to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
