use glam::Vec3;
use physworld_kernel::BodySnapshot;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer receives the frame's snapshot, never the world itself.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &[BodySnapshot], view: &RenderView) -> Self::Output;
}

/// Human-readable dump of a frame, for CLI output, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Optional header line, e.g. the simulated time.
    pub caption: Option<String>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption(caption: impl Into<String>) -> Self {
        Self {
            caption: Some(caption.into()),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &[BodySnapshot], view: &RenderView) -> String {
        let mut out = String::new();
        match &self.caption {
            Some(caption) => out.push_str(&format!("=== {caption} ===\n")),
            None => out.push_str("=== Frame ===\n"),
        }
        out.push_str(&format!("Bodies: {}\n", frame.len()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for body in frame {
            let p = body.position;
            let (axis, angle) = body.orientation.to_axis_angle();
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) rot={:.1}° about ({:.2}, {:.2}, {:.2})\n",
                body.id,
                p.x,
                p.y,
                p.z,
                angle.to_degrees(),
                axis.x,
                axis.y,
                axis.z
            ));
        }

        out
    }
}
