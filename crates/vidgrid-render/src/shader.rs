//! Shader management.

use crate::error::{RenderError, RenderResult};

/// WGSL shared by every element shader (camera uniforms, helpers).
pub const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");

/// Builder for creating shader modules from a shared prelude plus a body.
pub struct ShaderBuilder {
    source: Option<String>,
    label: Option<String>,
}

impl ShaderBuilder {
    /// Creates a new shader builder with the common prelude.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            label: None,
        }
    }

    /// Sets the shader body containing `vs_main` and `fs_main`.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the shader label for debugging.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds the shader module (does not create pipeline).
    pub fn build_module(self, device: &wgpu::Device) -> RenderResult<wgpu::ShaderModule> {
        let source = self.combined_source()?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: self.label.as_deref(),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        Ok(module)
    }

    fn combined_source(&self) -> RenderResult<String> {
        let body = self
            .source
            .as_ref()
            .ok_or_else(|| RenderError::ShaderCompilationFailed("missing shader source".into()))?;

        Ok(format!("{COMMON_WGSL}\n\n{body}"))
    }
}

impl Default for ShaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_is_an_error() {
        let err = ShaderBuilder::new().combined_source().err();
        assert!(matches!(err, Some(RenderError::ShaderCompilationFailed(_))));
    }

    #[test]
    fn test_prelude_comes_first() {
        let source = ShaderBuilder::new()
            .with_source("fn body() {}")
            .combined_source()
            .unwrap();
        let camera = source.find("struct CameraUniforms").unwrap();
        let body = source.find("fn body").unwrap();
        assert!(camera < body);
    }
}
