use std::collections::{BTreeMap, VecDeque};

use log::{debug, info, warn};

use spatial_storage_shared::{
    BitReader, BitWriter, BlockEntityKind, BlockProperty, CapacitySnapshot, CapacityTier,
    DeviceBinding, DeviceHandle, DeviceLink, DeviceUpdate, GameTick, GlobalPos,
    LinkedMachinesUpdateMessage, PersistError, PlayerId, Serde, StackUpdateMessage,
    StorageMessage, StorageNetwork, StoredStack, WorldMutType, WorldRefType, ACTIVE_PROPERTY,
    LINKED_PROPERTY,
};

use crate::{
    CloseReason, CommandRejection, ContainerKind, ContainerSession, ContainerTarget, Events,
    OpenFailure, PacketSender, RemoteTerminal, ServerConfig, SessionKey, StorageCommand,
    StorageServerError, TerminalError,
};

const CONTROLLER_SAVE_VERSION: u8 = 1;

/// Authoritative owner of every storage network in a world.
///
/// All mutation happens through `&mut self` on the server thread. Terminals
/// and sessions only hold controller positions and resolve them on use, so
/// a controller can disappear underneath them at any time.
pub struct StorageServer {
    config: ServerConfig,
    networks: BTreeMap<GlobalPos, StorageNetwork>,
    // stabilizer -> (controller, tier)
    stabilizers: BTreeMap<GlobalPos, (GlobalPos, CapacityTier)>,
    terminals: BTreeMap<GlobalPos, RemoteTerminal>,
    sessions: BTreeMap<SessionKey, ContainerSession>,
    next_session_key: u64,
    commands: VecDeque<(SessionKey, PlayerId, StorageCommand)>,
    events: Events,
    io: Option<Box<dyn PacketSender>>,
    current_tick: GameTick,
}

impl StorageServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            networks: BTreeMap::new(),
            stabilizers: BTreeMap::new(),
            terminals: BTreeMap::new(),
            sessions: BTreeMap::new(),
            next_session_key: 0,
            commands: VecDeque::new(),
            events: Events::new(),
            io: None,
            current_tick: 0,
        }
    }

    /// Must be called before pushes can reach any client
    pub fn io_load(&mut self, sender: Box<dyn PacketSender>) {
        self.io = Some(sender);
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn current_tick(&self) -> GameTick {
        self.current_tick
    }

    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    // Controllers

    pub fn place_controller<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
    ) -> Result<(), StorageServerError> {
        if self.networks.contains_key(&pos) {
            return Err(StorageServerError::ControllerExists {
                pos: pos.to_string(),
            });
        }
        Self::require_block(world, &pos, BlockEntityKind::StorageController)?;

        self.networks
            .insert(pos, StorageNetwork::new(pos, self.config.storage.clone()));
        world.set_block_property(&pos, ACTIVE_PROPERTY, BlockProperty::Bool(true));
        info!("Storage controller placed at {}", pos);
        Ok(())
    }

    /// Destroys the network and returns its contents for the caller to drop
    /// into the world. Sessions on the network close, stabilizers detach and
    /// terminals keep their now dangling link.
    pub fn remove_controller<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
    ) -> Result<Vec<StoredStack>, StorageServerError> {
        let mut network = self
            .networks
            .remove(&pos)
            .ok_or_else(|| StorageServerError::ControllerNotFound {
                pos: pos.to_string(),
            })?;
        let drops = network.destroy();

        self.stabilizers
            .retain(|_, (controller, _)| *controller != pos);
        self.close_sessions_where(CloseReason::ContainerRemoved, |session| {
            session.controller() == pos
        });
        world.set_block_property(&pos, ACTIVE_PROPERTY, BlockProperty::Bool(false));

        info!(
            "Storage controller at {} removed, dropping {} stacks",
            pos,
            drops.len()
        );
        Ok(drops)
    }

    /// Reacts to any block leaving the world and returns items that should
    /// be dropped at its position
    pub fn on_block_removed<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
    ) -> Vec<StoredStack> {
        if self.networks.contains_key(&pos) {
            return self.remove_controller(world, pos).unwrap_or_default();
        }
        if self.terminals.contains_key(&pos) {
            return self.remove_terminal(pos).unwrap_or_default();
        }
        if self.stabilizers.contains_key(&pos) {
            if let Err(error) = self.detach_stabilizer(pos) {
                warn!("Stabilizer at {} could not be detached: {}", pos, error);
            }
            return Vec::new();
        }

        let device = DeviceHandle::new(pos);
        for network in self.networks.values_mut() {
            if network.unbind_device(&device).is_some() {
                info!(
                    "Device at {} removed, unbound from controller at {}",
                    pos,
                    network.controller()
                );
            }
        }
        Vec::new()
    }

    pub fn network(&self, controller: &GlobalPos) -> Option<&StorageNetwork> {
        self.networks.get(controller)
    }

    pub fn network_mut(&mut self, controller: &GlobalPos) -> Option<&mut StorageNetwork> {
        self.networks.get_mut(controller)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &GlobalPos> {
        self.networks.keys()
    }

    fn require_network_mut(
        &mut self,
        controller: &GlobalPos,
    ) -> Result<&mut StorageNetwork, StorageServerError> {
        self.networks
            .get_mut(controller)
            .ok_or_else(|| StorageServerError::ControllerNotFound {
                pos: controller.to_string(),
            })
    }

    fn require_block<W: WorldRefType>(
        world: &W,
        pos: &GlobalPos,
        kind: BlockEntityKind,
    ) -> Result<(), StorageServerError> {
        if !world.is_chunk_loaded(pos) {
            return Err(StorageServerError::ChunkNotLoaded {
                pos: pos.to_string(),
            });
        }
        match world.block_entity_at(pos) {
            Some(handle) if handle.kind == kind => Ok(()),
            _ if kind == BlockEntityKind::StableWormhole => Err(StorageServerError::NotATerminal {
                pos: pos.to_string(),
            }),
            _ => Err(StorageServerError::NotAController {
                pos: pos.to_string(),
            }),
        }
    }

    // Stabilizers

    pub fn attach_stabilizer(
        &mut self,
        controller: GlobalPos,
        stabilizer: GlobalPos,
        tier: CapacityTier,
    ) -> Result<(), StorageServerError> {
        if self.stabilizers.contains_key(&stabilizer) {
            return Err(StorageServerError::StabilizerAttached {
                pos: stabilizer.to_string(),
            });
        }
        self.require_network_mut(&controller)?
            .install_capacity_module(tier);
        self.stabilizers.insert(stabilizer, (controller, tier));
        Ok(())
    }

    pub fn detach_stabilizer(&mut self, stabilizer: GlobalPos) -> Result<(), StorageServerError> {
        let (controller, tier) = self.stabilizers.remove(&stabilizer).ok_or_else(|| {
            StorageServerError::StabilizerNotAttached {
                pos: stabilizer.to_string(),
            }
        })?;
        self.require_network_mut(&controller)?
            .remove_capacity_module(tier)?;
        Ok(())
    }

    // Linked devices

    pub fn bind_device(
        &mut self,
        controller: &GlobalPos,
        device: DeviceHandle,
        binding: DeviceBinding,
    ) -> Result<Option<DeviceLink>, StorageServerError> {
        Ok(self.require_network_mut(controller)?.bind_device(device, binding))
    }

    pub fn unbind_device(
        &mut self,
        controller: &GlobalPos,
        device: &DeviceHandle,
    ) -> Result<Option<DeviceLink>, StorageServerError> {
        Ok(self.require_network_mut(controller)?.unbind_device(device))
    }

    pub fn configure_device(
        &mut self,
        controller: &GlobalPos,
        device: &DeviceHandle,
        update: DeviceUpdate,
    ) -> Result<(), StorageServerError> {
        self.require_network_mut(controller)?
            .configure_device(device, update)?;
        Ok(())
    }

    // Remote terminals

    pub fn place_terminal<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
    ) -> Result<(), StorageServerError> {
        Self::require_block(world, &pos, BlockEntityKind::StableWormhole)?;
        if !self.terminals.contains_key(&pos) {
            self.terminals.insert(pos, RemoteTerminal::new(pos));
            world.set_block_property(&pos, LINKED_PROPERTY, BlockProperty::Bool(false));
        }
        Ok(())
    }

    pub fn link_terminal<W: WorldMutType>(
        &mut self,
        world: &mut W,
        terminal: GlobalPos,
        controller: GlobalPos,
    ) -> Result<(), StorageServerError> {
        if !self.networks.contains_key(&controller) {
            return Err(StorageServerError::ControllerNotFound {
                pos: controller.to_string(),
            });
        }
        let entry = self.require_terminal_mut(&terminal)?;
        entry.link(controller);
        world.set_block_property(&terminal, LINKED_PROPERTY, BlockProperty::Bool(true));
        info!("Stable wormhole at {} linked to {}", terminal, controller);
        Ok(())
    }

    pub fn unlink_terminal<W: WorldMutType>(
        &mut self,
        world: &mut W,
        terminal: GlobalPos,
    ) -> Result<Option<GlobalPos>, StorageServerError> {
        let previous = self.require_terminal_mut(&terminal)?.unlink();
        world.set_block_property(&terminal, LINKED_PROPERTY, BlockProperty::Bool(false));
        Ok(previous)
    }

    /// Forgets the terminal, closes its sessions and returns the items held
    /// in its crafting matrix and order slot
    pub fn remove_terminal(&mut self, pos: GlobalPos) -> Result<Vec<StoredStack>, StorageServerError> {
        let mut terminal = self
            .terminals
            .remove(&pos)
            .ok_or_else(|| StorageServerError::TerminalNotFound {
                pos: pos.to_string(),
            })?;
        self.close_sessions_where(CloseReason::ContainerRemoved, |session| {
            session.target() == ContainerTarget::Wormhole(pos)
        });
        Ok(terminal.state_mut().take_items())
    }

    pub fn terminal(&self, pos: &GlobalPos) -> Option<&RemoteTerminal> {
        self.terminals.get(pos)
    }

    /// The network a terminal currently reaches
    pub fn resolve_terminal<W: WorldRefType>(
        &self,
        world: &W,
        terminal: &GlobalPos,
    ) -> Result<&StorageNetwork, StorageServerError> {
        let entry = self
            .terminals
            .get(terminal)
            .ok_or_else(|| StorageServerError::TerminalNotFound {
                pos: terminal.to_string(),
            })?;
        let controller = entry.require_link()?;
        if !world.is_chunk_loaded(&controller) {
            return Err(TerminalError::ChunkNotLoaded {
                controller: controller.to_string(),
            }
            .into());
        }
        self.networks
            .get(&controller)
            .filter(|network| !network.is_destroyed())
            .ok_or_else(|| {
                TerminalError::ControllerMissing {
                    controller: controller.to_string(),
                }
                .into()
            })
    }

    pub fn set_matrix_slot(
        &mut self,
        terminal: &GlobalPos,
        slot: usize,
        stack: Option<StoredStack>,
    ) -> Result<Option<StoredStack>, StorageServerError> {
        let entry = self.require_terminal_mut(terminal)?;
        let previous = entry.state_mut().set_matrix_slot(slot, stack)?;
        let linked = entry.linked_controller();
        self.mark_linked_dirty(linked);
        Ok(previous)
    }

    pub fn set_order_stack(
        &mut self,
        terminal: &GlobalPos,
        stack: Option<StoredStack>,
    ) -> Result<Option<StoredStack>, StorageServerError> {
        let entry = self.require_terminal_mut(terminal)?;
        let previous = entry.state_mut().set_order_stack(stack);
        let linked = entry.linked_controller();
        self.mark_linked_dirty(linked);
        Ok(previous)
    }

    fn require_terminal_mut(
        &mut self,
        terminal: &GlobalPos,
    ) -> Result<&mut RemoteTerminal, StorageServerError> {
        self.terminals
            .get_mut(terminal)
            .ok_or_else(|| StorageServerError::TerminalNotFound {
                pos: terminal.to_string(),
            })
    }

    fn mark_linked_dirty(&mut self, controller: Option<GlobalPos>) {
        if let Some(network) = controller.and_then(|pos| self.networks.get_mut(&pos)) {
            network.mark_dirty();
        }
    }

    // Sessions

    /// Opens a container UI for `player`. Checks run in order: the
    /// container must resolve to a live network, the player must be within
    /// reach unless the target is a remote, and single-user kinds must not
    /// already be open on that network.
    pub fn open_session<W: WorldRefType>(
        &mut self,
        world: &W,
        player: PlayerId,
        target: ContainerTarget,
    ) -> Result<SessionKey, OpenFailure> {
        let controller = self
            .check_container(world, &target)
            .map_err(|_| OpenFailure::ControllerInvalid)?;

        let kind = target.kind();
        if kind.is_distance_gated() && !self.in_range(world, &player, &target.block()) {
            return Err(OpenFailure::TooFar);
        }

        if self.config.is_single_user(kind)
            && self
                .sessions
                .values()
                .any(|session| session.controller() == controller && session.kind() == kind)
        {
            return Err(OpenFailure::AlreadyOpen);
        }

        let key = SessionKey::new(self.next_session_key);
        self.next_session_key += 1;
        self.sessions.insert(
            key,
            ContainerSession::new(player, target, controller, self.current_tick),
        );
        self.events.push_opened(key, player, kind);
        info!(
            "Session {:?} opened: player {:?} on {:?} of controller {}",
            key, player, kind, controller
        );
        Ok(key)
    }

    pub fn close_session(&mut self, key: &SessionKey) -> Result<(), StorageServerError> {
        let session = self
            .sessions
            .remove(key)
            .ok_or(StorageServerError::SessionNotFound { key: *key })?;
        self.events
            .push_closed(*key, session.player(), CloseReason::Requested);
        info!("Session {:?} closed by player {:?}", key, session.player());
        Ok(())
    }

    pub fn session(&self, key: &SessionKey) -> Option<&ContainerSession> {
        self.sessions.get(key)
    }

    pub fn session_keys(&self) -> Vec<SessionKey> {
        self.sessions.keys().copied().collect()
    }

    pub fn sessions_count(&self) -> usize {
        self.sessions.len()
    }

    fn close_sessions_where<F: Fn(&ContainerSession) -> bool>(
        &mut self,
        reason: CloseReason,
        predicate: F,
    ) {
        let keys: Vec<SessionKey> = self
            .sessions
            .iter()
            .filter(|(_, session)| predicate(session))
            .map(|(key, _)| *key)
            .collect();
        for key in keys {
            self.close_with_reason(key, reason);
        }
    }

    fn close_with_reason(&mut self, key: SessionKey, reason: CloseReason) {
        if let Some(session) = self.sessions.remove(&key) {
            self.events.push_closed(key, session.player(), reason);
            info!(
                "Session {:?} of player {:?} closed: {:?}",
                key,
                session.player(),
                reason
            );
        }
    }

    /// Resolves a target to the controller of a live network
    fn check_container<W: WorldRefType>(
        &self,
        world: &W,
        target: &ContainerTarget,
    ) -> Result<GlobalPos, CloseReason> {
        match target {
            ContainerTarget::Controller(pos) | ContainerTarget::Remote(pos) => {
                self.check_controller(world, pos)
            }
            ContainerTarget::Wormhole(pos) => {
                if !world.is_chunk_loaded(pos) {
                    return Err(CloseReason::NetworkUnreachable);
                }
                if !Self::block_is(world, pos, BlockEntityKind::StableWormhole) {
                    return Err(CloseReason::ContainerRemoved);
                }
                let terminal = self.terminals.get(pos).ok_or(CloseReason::ContainerRemoved)?;
                let controller = terminal
                    .linked_controller()
                    .ok_or(CloseReason::NetworkUnreachable)?;
                self.check_controller(world, &controller)
            }
        }
    }

    fn check_controller<W: WorldRefType>(
        &self,
        world: &W,
        pos: &GlobalPos,
    ) -> Result<GlobalPos, CloseReason> {
        if !world.is_chunk_loaded(pos) {
            return Err(CloseReason::NetworkUnreachable);
        }
        if !Self::block_is(world, pos, BlockEntityKind::StorageController) {
            return Err(CloseReason::ContainerRemoved);
        }
        match self.networks.get(pos) {
            Some(network) if !network.is_destroyed() => Ok(*pos),
            _ => Err(CloseReason::ContainerRemoved),
        }
    }

    fn block_is<W: WorldRefType>(world: &W, pos: &GlobalPos, kind: BlockEntityKind) -> bool {
        world
            .block_entity_at(pos)
            .is_some_and(|handle| handle.kind == kind)
    }

    fn in_range<W: WorldRefType>(&self, world: &W, player: &PlayerId, block: &GlobalPos) -> bool {
        match world.player_position(player) {
            Some((dimension, eyes)) if dimension == block.dimension => {
                eyes.distance_sq(&block.pos.center()) <= self.config.interaction_range_sq()
            }
            _ => false,
        }
    }

    fn validate_session<W: WorldRefType>(
        &self,
        world: &W,
        session: &ContainerSession,
    ) -> Result<(), CloseReason> {
        if world.player_position(&session.player()).is_none() {
            return Err(CloseReason::PlayerGone);
        }
        let controller = self.check_container(world, &session.target())?;
        if controller != session.controller() {
            return Err(CloseReason::NetworkUnreachable);
        }
        if session.kind().is_distance_gated()
            && !self.in_range(world, &session.player(), &session.target().block())
        {
            return Err(CloseReason::OutOfRange);
        }
        Ok(())
    }

    // Commands

    pub fn queue_command(
        &mut self,
        key: &SessionKey,
        command: StorageCommand,
    ) -> Result<(), StorageServerError> {
        let session = self
            .sessions
            .get(key)
            .ok_or(StorageServerError::SessionNotFound { key: *key })?;
        self.commands.push_back((*key, session.player(), command));
        Ok(())
    }

    fn apply_commands(&mut self) {
        while let Some((key, player, command)) = self.commands.pop_front() {
            if let Err(rejection) = self.apply_command(&key, player, command) {
                warn!(
                    "Command from player {:?} on session {:?} rejected: {:?}",
                    player, key, rejection
                );
                self.events.push_rejected(key, player, rejection);
            }
        }
    }

    fn apply_command(
        &mut self,
        key: &SessionKey,
        player: PlayerId,
        command: StorageCommand,
    ) -> Result<(), CommandRejection> {
        let (controller, target) = match self.sessions.get(key) {
            Some(session) => (session.controller(), session.target()),
            None => return Err(CommandRejection::SessionClosed),
        };

        match command {
            StorageCommand::Insert { stack } => {
                let leftover = self.live_network(&controller)?.insert(stack);
                self.events.push_delivered(player, leftover);
            }
            StorageCommand::Extract { kind, amount } => {
                let taken = self.live_network(&controller)?.extract(&kind, amount, false);
                self.events.push_delivered(player, taken);
            }
            StorageCommand::Craft {
                ingredients,
                output,
            } => {
                if target.kind() != ContainerKind::StableWormhole {
                    return Err(CommandRejection::WrongContainer);
                }
                self.live_network(&controller)?
                    .extract_batch(&ingredients)
                    .ok_or(CommandRejection::IngredientsMissing)?;
                self.events.push_delivered(player, output);
            }
            StorageCommand::SetMatrixSlot { slot, stack } => {
                let ContainerTarget::Wormhole(terminal) = target else {
                    return Err(CommandRejection::WrongContainer);
                };
                let previous = self
                    .set_matrix_slot(&terminal, slot, stack)
                    .map_err(|error| CommandRejection::Failed(error.to_string()))?;
                if let Some(previous) = previous {
                    self.events.push_delivered(player, previous);
                }
            }
            StorageCommand::SetOrderStack { stack } => {
                let ContainerTarget::Wormhole(terminal) = target else {
                    return Err(CommandRejection::WrongContainer);
                };
                let previous = self
                    .set_order_stack(&terminal, stack)
                    .map_err(|error| CommandRejection::Failed(error.to_string()))?;
                if let Some(previous) = previous {
                    self.events.push_delivered(player, previous);
                }
            }
            StorageCommand::ConfigureDevice { device, update } => {
                self.live_network(&controller)?
                    .configure_device(&device, update)
                    .map_err(|error| CommandRejection::Failed(error.to_string()))?;
            }
            StorageCommand::UnbindDevice { device } => {
                self.live_network(&controller)?.unbind_device(&device);
            }
        }
        Ok(())
    }

    fn live_network(
        &mut self,
        controller: &GlobalPos,
    ) -> Result<&mut StorageNetwork, CommandRejection> {
        self.networks
            .get_mut(controller)
            .filter(|network| !network.is_destroyed())
            .ok_or_else(|| {
                CommandRejection::Failed(format!("no storage network at {}", controller))
            })
    }

    // Tick

    /// Runs one authoritative step: queued commands apply in order, open
    /// sessions are validated, and on every `sync_interval`-th tick the
    /// surviving sessions receive a push of their network's state.
    pub fn tick<W: WorldRefType>(&mut self, world: &W, tick: GameTick) {
        self.current_tick = tick;

        self.apply_commands();

        let failures: Vec<(SessionKey, CloseReason)> = self
            .sessions
            .iter()
            .filter_map(|(key, session)| {
                self.validate_session(world, session)
                    .err()
                    .map(|reason| (*key, reason))
            })
            .collect();
        for (key, reason) in failures {
            self.close_with_reason(key, reason);
        }

        if tick % self.config.sync_interval.max(1) == 0 {
            self.send_all_updates();
        }
    }

    fn send_all_updates(&mut self) {
        let Some(io) = self.io.as_ref() else {
            if !self.sessions.is_empty() {
                warn!("StorageServer has no packet sender loaded, skipping sync");
            }
            return;
        };

        for (key, session) in self.sessions.iter_mut() {
            let Some(network) = self.networks.get(&session.controller()) else {
                continue;
            };
            let revision = network.revision();
            if !session.needs_push(revision) {
                continue;
            }

            let sync_index = session.next_sync_index();
            let stack_update = StorageMessage::StackUpdate(StackUpdateMessage {
                sync_index,
                capacity: CapacitySnapshot::from(network.ledger()),
                stacks: network.stacks(),
            });
            let machines_update = StorageMessage::LinkedMachinesUpdate(LinkedMachinesUpdateMessage {
                sync_index,
                devices: network.list_devices(),
            });

            let player = session.player();
            if let Err(error) = io.send(&player, &stack_update.to_bytes()) {
                warn!(
                    "Session {:?}: push to player {:?} failed: {}",
                    key, player, error
                );
                continue;
            }
            session.record_sent(sync_index);

            match io.send(&player, &machines_update.to_bytes()) {
                Ok(()) => {
                    session.record_push(sync_index, revision);
                    debug!(
                        "Session {:?}: pushed sync {} (revision {}) to player {:?}",
                        key, sync_index, revision, player
                    );
                }
                Err(error) => {
                    warn!(
                        "Session {:?}: push to player {:?} failed after the stack update: {}",
                        key, player, error
                    );
                }
            }
        }
    }

    // Persistence

    /// Save data for a controller: its network and attached stabilizers
    pub fn save_controller(&self, pos: &GlobalPos) -> Result<Vec<u8>, StorageServerError> {
        let network = self
            .networks
            .get(pos)
            .ok_or_else(|| StorageServerError::ControllerNotFound {
                pos: pos.to_string(),
            })?;
        let stabilizers: Vec<(GlobalPos, CapacityTier)> = self
            .stabilizers
            .iter()
            .filter(|(_, (controller, _))| controller == pos)
            .map(|(stabilizer, (_, tier))| (*stabilizer, *tier))
            .collect();

        let mut writer = BitWriter::new();
        CONTROLLER_SAVE_VERSION.ser(&mut writer);
        stabilizers.ser(&mut writer);
        network.write_save().ser(&mut writer);
        Ok(writer.to_bytes())
    }

    pub fn load_controller<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
        bytes: &[u8],
    ) -> Result<(), StorageServerError> {
        if self.networks.contains_key(&pos) {
            return Err(StorageServerError::ControllerExists {
                pos: pos.to_string(),
            });
        }

        let mut reader = BitReader::new(bytes);
        let version = u8::de(&mut reader).map_err(PersistError::from)?;
        if version != CONTROLLER_SAVE_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: version,
                expected: CONTROLLER_SAVE_VERSION,
            }
            .into());
        }
        let stabilizers =
            Vec::<(GlobalPos, CapacityTier)>::de(&mut reader).map_err(PersistError::from)?;
        let network_bytes = Vec::<u8>::de(&mut reader).map_err(PersistError::from)?;
        let network = StorageNetwork::read_save(pos, self.config.storage.clone(), &network_bytes)?;

        if let Some((stabilizer, _)) = stabilizers
            .iter()
            .find(|(stabilizer, _)| self.stabilizers.contains_key(stabilizer))
        {
            return Err(StorageServerError::StabilizerAttached {
                pos: stabilizer.to_string(),
            });
        }
        for (stabilizer, tier) in stabilizers {
            self.stabilizers.insert(stabilizer, (pos, tier));
        }

        self.networks.insert(pos, network);
        world.set_block_property(&pos, ACTIVE_PROPERTY, BlockProperty::Bool(true));
        info!("Storage controller at {} loaded", pos);
        Ok(())
    }

    pub fn save_terminal(&self, pos: &GlobalPos) -> Result<Vec<u8>, StorageServerError> {
        self.terminals
            .get(pos)
            .map(RemoteTerminal::write_save)
            .ok_or_else(|| StorageServerError::TerminalNotFound {
                pos: pos.to_string(),
            })
    }

    pub fn load_terminal<W: WorldMutType>(
        &mut self,
        world: &mut W,
        pos: GlobalPos,
        bytes: &[u8],
    ) -> Result<(), StorageServerError> {
        if self.terminals.contains_key(&pos) {
            return Err(StorageServerError::TerminalExists {
                pos: pos.to_string(),
            });
        }
        let terminal = RemoteTerminal::read_save(pos, bytes)?;
        let linked = terminal.linked_controller().is_some();
        self.terminals.insert(pos, terminal);
        world.set_block_property(&pos, LINKED_PROPERTY, BlockProperty::Bool(linked));
        Ok(())
    }
}
