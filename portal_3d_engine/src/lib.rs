/*!
# Portal 3D Engine

Recursive portal rendering core: see-through portals rendered through
portals, a bounded render-target pool backing every recursive view, and
travelers that cross portals with a clip-plane duplicate hiding the seam.

The host engine stays in charge of drawing. It implements the `Renderer`
trait, forwards its per-camera begin/end callbacks to `PortalRenderer`, and
reads the clip-plane parameters written into traveler materials.

## Architecture

- **RenderTargetPool**: bounded set of offscreen color+depth targets
- **PortalSet / PortalRegistry**: portals, their links and surface state
- **VisibilityGraph**: per-frame recursive discovery and rendering of portal views
- **PortalRenderer**: frame coordinator driven by the host callbacks
- **Traveler**: teleport and crossing transition of a moving object
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod renderer;
pub mod pool;
pub mod portal;
pub mod visibility;
pub mod traveler;

// Main portal3d namespace module
pub mod portal3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging host)
    pub use crate::engine::Engine;

    // Frame coordinator and backend trait
    pub use crate::renderer::{PortalRenderer, PortalRendererConfig, Renderer};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
        pub use crate::pool::*;
        pub use crate::visibility::*;
    }

    // Portal sub-module
    pub mod portal {
        pub use crate::portal::*;
    }

    // Traveler sub-module
    pub mod traveler {
        pub use crate::traveler::*;
    }
}

// Re-export math and windowing types used in the public API
pub use glam;
pub use winit::dpi::PhysicalSize;
