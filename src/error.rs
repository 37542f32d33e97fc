//! Error types for neurofield.
//!
//! The simulation core never fails. Errors only come from the edges:
//! configuration files, the template registry, and (with the `viewer`
//! feature) window and GPU setup.

use std::fmt;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
    /// A value is outside its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors raised when the field asks the template registry for its mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The registry has not signalled readiness yet.
    NotReady,
    /// No template is registered under this name.
    Missing(String),
    /// The template exists but contains no mesh that can be colored.
    NoPaintablePrimitives(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotReady => write!(f, "Resources are not ready yet"),
            ResourceError::Missing(name) => write!(f, "No template named '{}'", name),
            ResourceError::NoPaintablePrimitives(name) => {
                write!(f, "Template '{}' has no mesh to paint", name)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Errors that can occur during GPU initialization.
#[cfg(feature = "viewer")]
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

#[cfg(feature = "viewer")]
impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

#[cfg(feature = "viewer")]
impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

#[cfg(feature = "viewer")]
impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[cfg(feature = "viewer")]
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The field could not be placed.
    Resource(ResourceError),
    /// The configuration could not be loaded.
    Config(ConfigError),
}

#[cfg(feature = "viewer")]
impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ViewerError::Resource(e) => write!(f, "Resource error: {}", e),
            ViewerError::Config(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "viewer")]
impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
            ViewerError::Resource(e) => Some(e),
            ViewerError::Config(e) => Some(e),
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

#[cfg(feature = "viewer")]
impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

#[cfg(feature = "viewer")]
impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

#[cfg(feature = "viewer")]
impl From<ResourceError> for ViewerError {
    fn from(e: ResourceError) -> Self {
        ViewerError::Resource(e)
    }
}

#[cfg(feature = "viewer")]
impl From<ConfigError> for ViewerError {
    fn from(e: ConfigError) -> Self {
        ViewerError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::Missing("neuron".into());
        assert_eq!(err.to_string(), "No template named 'neuron'");
    }

    #[test]
    fn test_config_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::from(io);
        assert!(err.source().is_some());
        assert!(ConfigError::Invalid("x".into()).source().is_none());
    }
}
