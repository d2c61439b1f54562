//! Command buffers and the command lists made of them.

use std::slice::Iter;

use super::command::*;
use super::sort_key::SortKey;
use super::visitor::{FrameState, Visitor};

macro_rules! impl_buffer_accessor {
    ($name:ident, $variant:ident, $cmd:ident) => {
        /// Appends a new command, and returns a mutable reference to it.
        pub fn $name(&mut self) -> &mut $cmd {
            self.commands.push(Command::$variant($cmd::default()));
            match self.commands.last_mut() {
                Some(Command::$variant(v)) => v,
                _ => unreachable!(),
            }
        }
    };
}

macro_rules! impl_list_accessor {
    ($name:ident, $cmd:ident) => {
        /// Appends a new command in a new command buffer keyed with the key after the
        /// current one, and returns a mutable reference to it.
        #[inline]
        pub fn $name(&mut self) -> &mut $cmd {
            self.make_command_buffer().$name()
        }
    };
}

/// An ordered group of commands sharing one sort key. Commands in a buffer are never
/// reordered.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    key: SortKey,
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new(key: SortKey) -> Self {
        CommandBuffer {
            key,
            commands: Vec::new(),
        }
    }

    #[inline]
    pub fn key(&self) -> SortKey {
        self.key
    }

    #[inline]
    pub fn push<T: Into<Command>>(&mut self, cmd: T) -> &mut Self {
        self.commands.push(cmd.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<Command> {
        self.commands.iter()
    }

    impl_buffer_accessor!(clear, Clear, ClearCommand);
    impl_buffer_accessor!(draw, Draw, DrawCommand);
    impl_buffer_accessor!(viewport, Viewport, ViewportCommand);
    impl_buffer_accessor!(scissor, Scissor, ScissorCommand);
    impl_buffer_accessor!(fill_vertex_buffer, FillVertexBuffer, FillVertexBufferCommand);
    impl_buffer_accessor!(fill_index_buffer, FillIndexBuffer, FillIndexBufferCommand);
    impl_buffer_accessor!(frame_buffer, FrameBuffer, FrameBufferCommand);
    impl_buffer_accessor!(
        frame_buffer_texture,
        FrameBufferTexture,
        FrameBufferTextureCommand
    );
    impl_buffer_accessor!(generate_mipmaps, GenerateMipmaps, GenerateMipmapsCommand);
    impl_buffer_accessor!(
        set_material_parameters,
        SetMaterialParameters,
        SetMaterialParametersCommand
    );
}

/// `CommandList` is an ordered sequence of command buffers. It is recorded by a single
/// producer, and consumed exactly once by the graphics device.
///
/// Buffers are dispatched in their current order, so `sort` should be called before
/// `accept` if the order matters.
#[derive(Debug)]
pub struct CommandList {
    buffers: Vec<CommandBuffer>,
    sorted: bool,
    current_key: SortKey,
}

impl Default for CommandList {
    fn default() -> Self {
        CommandList::new()
    }
}

impl CommandList {
    pub fn new() -> Self {
        CommandList::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CommandList {
            buffers: Vec::with_capacity(capacity),
            sorted: true,
            current_key: SortKey::default(),
        }
    }

    /// Appends a new command buffer with `key`, and makes `key` the current key.
    pub fn make_command_buffer_keyed(&mut self, key: SortKey) -> &mut CommandBuffer {
        self.sorted = false;
        self.current_key = key;
        self.buffers.push(CommandBuffer::new(key));

        let last = self.buffers.len() - 1;
        &mut self.buffers[last]
    }

    /// Appends a new command buffer keyed with the key after the current one.
    #[inline]
    pub fn make_command_buffer(&mut self) -> &mut CommandBuffer {
        let key = self.current_key.next();
        self.make_command_buffer_keyed(key)
    }

    #[inline]
    pub fn current_key(&self) -> SortKey {
        self.current_key
    }

    /// Sorts the command buffers by ascending key. Buffers with equal keys keep their
    /// insertion order.
    pub fn sort(&mut self) {
        if !self.sorted {
            self.buffers.sort_by_key(|v| v.key);
            self.sorted = true;
        }
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn iter(&self) -> Iter<CommandBuffer> {
        self.buffers.iter()
    }

    /// Removes all the command buffers.
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.sorted = true;
        self.current_key = SortKey::default();
    }

    /// Dispatches every command to `visitor`, buffer by buffer in the current order. A
    /// command that fails is logged and skipped, and never stops the commands after it.
    pub fn accept<V>(&self, visitor: &mut V, frame: &mut FrameState)
    where
        V: Visitor + ?Sized,
    {
        for buffer in &self.buffers {
            for cmd in &buffer.commands {
                frame.stats.commands = frame.stats.commands.saturating_add(1);
                if let Err(err) = cmd.accept(visitor, frame) {
                    warn!(
                        "Skips {} command in buffer {}. {}",
                        cmd.name(),
                        buffer.key,
                        err
                    );
                    frame.stats.failures = frame.stats.failures.saturating_add(1);
                }
            }
        }
    }

    impl_list_accessor!(clear, ClearCommand);
    impl_list_accessor!(draw, DrawCommand);
    impl_list_accessor!(viewport, ViewportCommand);
    impl_list_accessor!(scissor, ScissorCommand);
    impl_list_accessor!(fill_vertex_buffer, FillVertexBufferCommand);
    impl_list_accessor!(fill_index_buffer, FillIndexBufferCommand);
    impl_list_accessor!(frame_buffer, FrameBufferCommand);
    impl_list_accessor!(frame_buffer_texture, FrameBufferTextureCommand);
    impl_list_accessor!(generate_mipmaps, GenerateMipmapsCommand);
    impl_list_accessor!(set_material_parameters, SetMaterialParametersCommand);
}

impl<'a> IntoIterator for &'a CommandList {
    type Item = &'a CommandBuffer;
    type IntoIter = Iter<'a, CommandBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffers.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::prelude::Color;

    #[test]
    fn keys() {
        let mut cmds = CommandList::new();
        assert!(cmds.is_empty());
        assert!(cmds.is_sorted());

        cmds.clear().color(Color::red());
        assert_eq!(cmds.current_key(), SortKey::new(1));
        assert!(!cmds.is_sorted());

        cmds.make_command_buffer_keyed(SortKey::new(10)).draw();
        cmds.draw().vertex_count(3);
        assert_eq!(cmds.current_key(), SortKey::new(11));

        let keys: Vec<_> = cmds.iter().map(|v| v.key().value()).collect();
        assert_eq!(keys, vec![1, 10, 11]);
    }

    #[test]
    fn buffer() {
        let mut cmds = CommandList::new();
        {
            let buffer = cmds.make_command_buffer_keyed(SortKey::new(5));
            buffer.viewport().size(800, 600);
            buffer.scissor().position(10, 10);
            buffer.clear().clear_depth(true);
        }

        assert_eq!(cmds.len(), 1);
        let names: Vec<_> = cmds.iter().flat_map(|v| v.iter()).map(|v| v.name()).collect();
        assert_eq!(names, vec!["Viewport", "Scissor", "Clear"]);
    }

    #[test]
    fn sort() {
        let mut cmds = CommandList::new();
        cmds.make_command_buffer_keyed(SortKey::new(3)).clear();
        cmds.make_command_buffer_keyed(SortKey::new(1)).draw();
        cmds.make_command_buffer_keyed(SortKey::new(3)).draw();
        cmds.make_command_buffer_keyed(SortKey::new(1)).viewport();

        cmds.sort();
        assert!(cmds.is_sorted());

        let order: Vec<_> = cmds
            .iter()
            .map(|v| (v.key().value(), v.iter().next().unwrap().name()))
            .collect();

        assert_eq!(
            order,
            vec![(1, "Draw"), (1, "Viewport"), (3, "Clear"), (3, "Draw")]
        );

        cmds.reset();
        assert!(cmds.is_empty());
        assert!(cmds.is_sorted());
        assert_eq!(cmds.current_key(), SortKey::default());
    }
}
