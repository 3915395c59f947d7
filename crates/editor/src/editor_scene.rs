//! Editor scene: selection, gizmo layers and drag routing.

use foundation::math::{Quat, Vec2, Vec3};
use runtime::event_bus::{Event, EventBus, Subscription};
use runtime::frame::Frame;
use scene::entity::EntityId;
use scene::world::World;
use tracing::{debug, trace};

use crate::config::EditorConfig;
use crate::gizmo::{MoveAxisEntity, MovePlaneEntity, Placement, RotateEntity};
use crate::handlers::{self, Anchor, DragInput, PoseUpdate};
use crate::host::GlobeHost;
use crate::layer::{GizmoLayer, LayerControl, LayerEvent, LayerKind};
use crate::op::GizmoOp;

/// Notifications for hosts and UI collaborators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Select(EntityId),
    Unselect(Option<EntityId>),
    Move(EntityId),
}

impl std::fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorEvent::Select(entity) => write!(f, "select {entity}"),
            EditorEvent::Unselect(Some(entity)) => write!(f, "unselect {entity}"),
            EditorEvent::Unselect(None) => f.write_str("unselect"),
            EditorEvent::Move(entity) => write!(f, "move {entity}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Selected,
    Dragging(GizmoOp),
}

/// Gizmo-based pose editor for a single selected entity.
///
/// The scene owns the selection and active-operation slots. Entity poses
/// live in the [`World`]; the scene writes them through its setters.
#[derive(Debug)]
pub struct EditorScene {
    move_axis: GizmoLayer<MoveAxisEntity>,
    move_plane: GizmoLayer<MovePlaneEntity>,
    rotate: GizmoLayer<RotateEntity>,
    selected: Option<EntityId>,
    active_op: Option<GizmoOp>,
    click_pos: Vec2,
    anchor: Option<Anchor>,
    /// Navigation was taken from the host and not yet handed back.
    navigation_suspended: bool,
    frame: Frame,
    events: EventBus<EditorEvent>,
}

impl Default for EditorScene {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorScene {
    pub fn new(config: &EditorConfig) -> Self {
        let events = match config.event_history {
            Some(limit) => EventBus::with_history_limit(limit),
            None => EventBus::new(),
        };
        Self {
            move_axis: GizmoLayer::new(
                LayerKind::MoveAxis,
                MoveAxisEntity::new(config.axis_size),
                config.depth_order,
            ),
            move_plane: GizmoLayer::new(
                LayerKind::MovePlane,
                MovePlaneEntity::new(config.plane_size),
                config.depth_order,
            ),
            rotate: GizmoLayer::new(
                LayerKind::Rotate,
                RotateEntity::new(config.ring_size),
                config.depth_order,
            ),
            selected: None,
            active_op: None,
            click_pos: Vec2::new(0.0, 0.0),
            anchor: None,
            navigation_suspended: false,
            frame: Frame::default(),
            events,
        }
    }

    /// Attach the gizmo layers; layer input is ignored until then.
    pub fn bind(&mut self) {
        for kind in LayerKind::ALL {
            self.layer_mut(kind).set_attached(true);
        }
        debug!("editor scene bound");
    }

    /// Detach the layers, drop the selection and any drag in progress.
    pub fn unbind<H: GlobeHost + ?Sized>(&mut self, host: &mut H) {
        self.unselect();
        self.active_op = None;
        self.resume_navigation(host);
        for kind in LayerKind::ALL {
            self.layer_mut(kind).set_attached(false);
        }
        debug!("editor scene unbound");
    }

    pub fn is_bound(&self) -> bool {
        self.move_axis.is_attached()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    /// Recorded notifications, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &Event<EditorEvent>> + '_ {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event<EditorEvent>> {
        self.events.drain()
    }

    pub fn state(&self) -> EditorState {
        match (self.selected, self.active_op) {
            (None, _) => EditorState::Idle,
            (Some(_), None) => EditorState::Selected,
            (Some(_), Some(op)) => EditorState::Dragging(op),
        }
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn active_op(&self) -> Option<GizmoOp> {
        self.active_op
    }

    /// Select `entity` for editing.
    ///
    /// Returns `false` without side effects when it is already selected,
    /// unknown to `world`, or not editable. A different previous selection
    /// is unselected first.
    pub fn select(&mut self, world: &World, entity: EntityId) -> bool {
        if self.selected == Some(entity) {
            return false;
        }
        if !world.contains(entity) || !world.is_editable(entity) {
            debug!(%entity, "entity is not editable, selection ignored");
            return false;
        }
        self.unselect();

        self.selected = Some(entity);
        self.set_visible(true);
        self.events.emit(self.frame, EditorEvent::Select(entity));
        debug!(%entity, "selected");
        true
    }

    /// Drop the selection and hide the gizmos. No-op when nothing is selected.
    pub fn unselect(&mut self) {
        let Some(previous) = self.selected.take() else {
            return;
        };
        self.active_op = None;
        self.anchor = None;
        self.events.emit(self.frame, EditorEvent::Unselect(Some(previous)));
        self.set_visible(false);
        debug!(entity = %previous, "unselected");
    }

    /// Clicks on scene content; empty space leaves the selection alone.
    pub fn handle_click(&mut self, world: &World, picked: Option<EntityId>) -> bool {
        match picked {
            Some(entity) => self.select(world, entity),
            None => false,
        }
    }

    /// Move all three gizmos to `position`, aligned with `frame`.
    pub fn set_axis_position(&mut self, position: Vec3, frame: Quat) {
        let placement = Placement { position, frame };
        for kind in LayerKind::ALL {
            self.layer_mut(kind).place(placement);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        for kind in LayerKind::ALL {
            self.layer_mut(kind).set_visible(visible);
        }
    }

    /// Pointer input routed by the host to one of the gizmo layers.
    pub fn handle_layer_event<H: GlobeHost + ?Sized>(
        &mut self,
        kind: LayerKind,
        event: LayerEvent,
        world: &World,
        host: &mut H,
    ) {
        let layer = self.layer_mut(kind);
        if !layer.accepts_input() {
            trace!(layer = kind.name(), ?event, "layer inactive, event ignored");
            return;
        }

        match event {
            LayerEvent::Enter { op } => {
                layer.set_hovered(op, true);
            }
            LayerEvent::Leave { op } => {
                layer.set_hovered(op, false);
            }
            LayerEvent::Down { op, pos } => {
                if !layer.owns(op) {
                    trace!(layer = kind.name(), %op, "operation not on this layer");
                    return;
                }
                self.click_pos = pos;
                if let Some(transform) = self.selected.and_then(|e| world.transform(e)) {
                    self.anchor = Some(Anchor {
                        position: transform.position,
                        orientation: transform.orientation,
                    });
                }
                self.active_op = Some(op);
                self.navigation_suspended = true;
                host.set_navigation_active(false);
                debug!(%op, x = pos.x, y = pos.y, "drag started");
            }
            LayerEvent::Up { .. } => {
                if let Some(op) = self.active_op.take() {
                    debug!(%op, "drag ended");
                }
                self.resume_navigation(host);
            }
        }
    }

    /// Run the active operation for a pointer at `screen`.
    ///
    /// Returns `true` when a handler ran. A `Move` notification follows every
    /// run, including runs whose rays missed.
    pub fn handle_pointer_move<H: GlobeHost + ?Sized>(
        &mut self,
        screen: Vec2,
        world: &mut World,
        host: &H,
    ) -> bool {
        let (Some(entity), Some(op), Some(anchor)) = (self.selected, self.active_op, self.anchor)
        else {
            return false;
        };

        let input = DragInput::from_screen(host, self.click_pos, screen);
        let gizmo_up = self.move_axis.gizmo().up_axis();
        match handlers::run(op, host, &input, &anchor, gizmo_up) {
            Some(PoseUpdate::Position(position)) => {
                world.set_position(entity, position);
            }
            Some(PoseUpdate::Pitch(deg)) => {
                world.set_pitch(entity, deg);
            }
            Some(PoseUpdate::Yaw(deg)) => {
                world.set_yaw(entity, deg);
            }
            Some(PoseUpdate::Roll(deg)) => {
                world.set_roll(entity, deg);
            }
            None => {}
        }

        self.events.emit(self.frame, EditorEvent::Move(entity));
        true
    }

    /// Per-frame tick: keep the gizmos on the selected entity and hand back
    /// navigation left over from an abandoned drag.
    pub fn sync<H: GlobeHost + ?Sized>(&mut self, frame: Frame, world: &World, host: &mut H) {
        self.frame = frame;
        if self.active_op.is_none() {
            self.resume_navigation(host);
        }

        let Some(position) = self.selected.and_then(|e| world.position(e)) else {
            return;
        };
        self.set_axis_position(position, host.frame_rotation_at(position));
    }

    pub fn move_axis_layer(&self) -> &GizmoLayer<MoveAxisEntity> {
        &self.move_axis
    }

    pub fn move_plane_layer(&self) -> &GizmoLayer<MovePlaneEntity> {
        &self.move_plane
    }

    pub fn rotate_layer(&self) -> &GizmoLayer<RotateEntity> {
        &self.rotate
    }

    pub fn layer(&self, kind: LayerKind) -> &dyn LayerControl {
        match kind {
            LayerKind::MoveAxis => &self.move_axis,
            LayerKind::MovePlane => &self.move_plane,
            LayerKind::Rotate => &self.rotate,
        }
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut dyn LayerControl {
        match kind {
            LayerKind::MoveAxis => &mut self.move_axis,
            LayerKind::MovePlane => &mut self.move_plane,
            LayerKind::Rotate => &mut self.rotate,
        }
    }

    fn resume_navigation<H: GlobeHost + ?Sized>(&mut self, host: &mut H) {
        if self.navigation_suspended {
            self.navigation_suspended = false;
            host.set_navigation_active(true);
        }
    }
}
