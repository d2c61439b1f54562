//! The double-dispatch protocol between commands and backends.

use super::assets::prelude::{ProgramHandle, RenderState};
use super::cache::MaterialCache;
use super::command::*;
use super::errors::{Error, Result};

/// The statistics of a submission.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmitStats {
    /// The number of commands dispatched.
    pub commands: u32,
    /// The number of draw calls issued to the native device.
    pub draws: u32,
    /// The number of commands skipped because of invalid handles.
    pub skipped: u32,
    /// The number of commands that failed.
    pub failures: u32,
    /// The number of triangles assembled by the issued draws.
    pub triangles: u32,
}

/// The snapshot of the state a draw has been issued with. It's compared with the next
/// draw to skip redundant state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    pub program: ProgramHandle,
    pub state: RenderState,
}

/// The context of one submission, it's created fresh every time a command list is
/// submitted and dropped once the list has been dispatched.
pub struct FrameState<'a> {
    /// The materials referenced by draws and parameter updates.
    pub materials: &'a mut MaterialCache,
    /// The state of the last draw issued with a material, if any.
    pub previous: Option<DrawState>,
    pub stats: SubmitStats,
}

impl<'a> FrameState<'a> {
    pub fn new(materials: &'a mut MaterialCache) -> Self {
        FrameState {
            materials,
            previous: None,
            stats: SubmitStats::default(),
        }
    }
}

/// `Visitor` is implemented by backends, with one method per kind of command.
/// `Command::accept` calls exactly one of them.
pub trait Visitor {
    fn visit_clear(&mut self, frame: &mut FrameState, cmd: &ClearCommand) -> Result<()>;

    fn visit_draw(&mut self, frame: &mut FrameState, cmd: &DrawCommand) -> Result<()>;

    fn visit_viewport(&mut self, frame: &mut FrameState, cmd: &ViewportCommand) -> Result<()>;

    fn visit_scissor(&mut self, frame: &mut FrameState, cmd: &ScissorCommand) -> Result<()>;

    fn visit_fill_vertex_buffer(
        &mut self,
        frame: &mut FrameState,
        cmd: &FillVertexBufferCommand,
    ) -> Result<()>;

    fn visit_fill_index_buffer(
        &mut self,
        frame: &mut FrameState,
        cmd: &FillIndexBufferCommand,
    ) -> Result<()>;

    fn visit_frame_buffer(&mut self, frame: &mut FrameState, cmd: &FrameBufferCommand)
        -> Result<()>;

    fn visit_frame_buffer_texture(
        &mut self,
        frame: &mut FrameState,
        cmd: &FrameBufferTextureCommand,
    ) -> Result<()>;

    fn visit_generate_mipmaps(
        &mut self,
        frame: &mut FrameState,
        cmd: &GenerateMipmapsCommand,
    ) -> Result<()>;

    /// Overwrites the named parameters of material in place. Parameter updates never
    /// touch native state, so the default implementation works for most backends.
    fn visit_set_material_parameters(
        &mut self,
        frame: &mut FrameState,
        cmd: &SetMaterialParametersCommand,
    ) -> Result<()> {
        let material = match frame.materials.get_mut(cmd.material) {
            Some(material) => material,
            None => {
                debug!("{}", Error::MaterialHandleInvalid(cmd.material));
                frame.stats.skipped = frame.stats.skipped.saturating_add(1);
                return Ok(());
            }
        };

        for &(ref name, value) in &cmd.params {
            if !material.set(name, value) {
                debug!("{} has no parameter named {}.", cmd.material, name);
            }
        }

        Ok(())
    }
}
