use spatial_storage_shared::{
    BitReader, BitWrite, BitWriter, GlobalPos, PersistError, Serde, SerdeErr, StoredStack,
};

use super::TerminalError;

pub const MATRIX_SLOTS: usize = 9;

const SAVE_FORMAT_VERSION: u8 = 1;

/// Crafting matrix and order slot of a terminal. These items are owned by
/// the terminal, not by the network it points at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerminalState {
    matrix: [Option<StoredStack>; MATRIX_SLOTS],
    order_stack: Option<StoredStack>,
}

impl TerminalState {
    pub fn matrix(&self) -> &[Option<StoredStack>; MATRIX_SLOTS] {
        &self.matrix
    }

    pub fn matrix_slot(&self, slot: usize) -> Option<&StoredStack> {
        self.matrix.get(slot).and_then(Option::as_ref)
    }

    pub fn order_stack(&self) -> Option<&StoredStack> {
        self.order_stack.as_ref()
    }

    /// Replaces a matrix slot and returns what was there
    pub fn set_matrix_slot(
        &mut self,
        slot: usize,
        stack: Option<StoredStack>,
    ) -> Result<Option<StoredStack>, TerminalError> {
        let entry = self.matrix.get_mut(slot).ok_or(TerminalError::InvalidSlot {
            slot,
            slots: MATRIX_SLOTS,
        })?;
        Ok(std::mem::replace(entry, stack.filter(|stack| !stack.is_empty())))
    }

    pub fn set_order_stack(&mut self, stack: Option<StoredStack>) -> Option<StoredStack> {
        std::mem::replace(&mut self.order_stack, stack.filter(|stack| !stack.is_empty()))
    }

    /// Empties the matrix and order slot, returning their items
    pub fn take_items(&mut self) -> Vec<StoredStack> {
        self.matrix
            .iter_mut()
            .filter_map(Option::take)
            .chain(self.order_stack.take())
            .collect()
    }
}

impl Serde for TerminalState {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for slot in &self.matrix {
            slot.ser(writer);
        }
        self.order_stack.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut state = TerminalState::default();
        for slot in state.matrix.iter_mut() {
            *slot = Option::<StoredStack>::de(reader)?;
        }
        state.order_stack = Option::<StoredStack>::de(reader)?;
        Ok(state)
    }
}

/// A stable wormhole. It references a network by its controller position
/// and never owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteTerminal {
    pos: GlobalPos,
    linked_controller: Option<GlobalPos>,
    state: TerminalState,
}

impl RemoteTerminal {
    pub fn new(pos: GlobalPos) -> Self {
        Self {
            pos,
            linked_controller: None,
            state: TerminalState::default(),
        }
    }

    pub fn pos(&self) -> GlobalPos {
        self.pos
    }

    pub fn linked_controller(&self) -> Option<GlobalPos> {
        self.linked_controller
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut TerminalState {
        &mut self.state
    }

    pub(crate) fn link(&mut self, controller: GlobalPos) -> Option<GlobalPos> {
        self.linked_controller.replace(controller)
    }

    pub(crate) fn unlink(&mut self) -> Option<GlobalPos> {
        self.linked_controller.take()
    }

    /// The linked controller, or [`TerminalError::NotLinked`]
    pub fn require_link(&self) -> Result<GlobalPos, TerminalError> {
        self.linked_controller.ok_or_else(|| TerminalError::NotLinked {
            terminal: self.pos.to_string(),
        })
    }

    pub fn write_save(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        SAVE_FORMAT_VERSION.ser(&mut writer);
        self.linked_controller.ser(&mut writer);
        self.state.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn read_save(pos: GlobalPos, bytes: &[u8]) -> Result<Self, PersistError> {
        let mut reader = BitReader::new(bytes);

        let version = u8::de(&mut reader)?;
        if version != SAVE_FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: version,
                expected: SAVE_FORMAT_VERSION,
            });
        }

        let linked_controller = Option::<GlobalPos>::de(&mut reader)?;
        let state = TerminalState::de(&mut reader)?;
        for stack in state.matrix.iter().flatten().chain(state.order_stack.iter()) {
            if stack.is_empty() {
                return Err(PersistError::EmptyStack {
                    kind: stack.kind.to_string(),
                });
            }
        }

        Ok(Self {
            pos,
            linked_controller,
            state,
        })
    }
}
