//! Scene building: projects a topology and the interaction state into an
//! ordered display list.

use crate::theme::Theme;
use kurbo::{Affine, BezPath, Point, Rect};
use netdraw_core::config::LinkStyle;
use netdraw_core::elements::{Connection, Device, Group, ItemRef, Spatial};
use netdraw_core::geometry;
use netdraw_core::interaction::InteractionController;
use netdraw_core::model::TopologyModel;
use peniko::Color;
use std::borrow::Cow;

/// Paint layer, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Groups,
    Connections,
    Draft,
    Devices,
    Ports,
}

/// A drawable primitive in world coordinates.
#[derive(Debug, Clone)]
pub enum Primitive {
    FillRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        radius: f64,
        width: f64,
        color: Color,
    },
    StrokePath {
        path: BezPath,
        width: f64,
        color: Color,
        dashed: bool,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Label {
        text: String,
        position: Point,
        size: f64,
        color: Color,
    },
    /// Clickable "x" shown on a selected connection.
    DeleteAffordance {
        center: Point,
        radius: f64,
        color: Color,
        connection_id: String,
    },
}

/// One entry of the display list.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub layer: Layer,
    /// Element this command belongs to, if any.
    pub item: Option<ItemRef>,
    pub primitive: Primitive,
}

/// A built frame: the view transform plus primitives in paint order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// World-to-screen transform.
    pub transform: Affine,
    pub background: Option<Color>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in the given layer.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// Commands belonging to an element.
    pub fn commands_for<'a>(&'a self, item: &'a ItemRef) -> impl Iterator<Item = &'a DrawCommand> {
        self.commands.iter().filter(move |c| c.item.as_ref() == Some(item))
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    pub model: &'a TopologyModel,
    /// Selection and transient gesture state; `None` renders the bare model.
    pub controller: Option<&'a InteractionController>,
    pub theme: Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(model: &'a TopologyModel) -> Self {
        Self {
            model,
            controller: None,
            theme: Theme::default(),
        }
    }

    /// Include selection and gesture previews.
    pub fn with_controller(mut self, controller: &'a InteractionController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn is_selected(&self, item: &ItemRef) -> bool {
        self.controller.is_some_and(|c| c.is_selected(item))
    }
}

/// Trait for rendering backends.
///
/// A backend turns a [`RenderContext`] into whatever its toolkit paints.
pub trait Renderer {
    /// Build the frame for the current state.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Background colour used to clear the frame.
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.theme.background
    }
}

/// Renderer producing a [`Scene`] display list.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    scene: Scene,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets the internal one).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for SceneRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene = build_scene(ctx);
    }
}

/// Build a scene. Pure: the same inputs always give the same display list.
pub fn build_scene(ctx: &RenderContext) -> Scene {
    let view = &ctx.model.view;
    let zoom = view.scale();
    let mut builder = SceneBuilder {
        ctx,
        zoom,
        commands: Vec::new(),
    };

    let devices = builder.devices_with_previews();
    let groups = builder.groups_with_previews();

    for group in &groups {
        builder.group(group);
    }
    for connection in ctx.model.connections() {
        builder.connection(connection, &devices);
    }
    builder.draft(&devices);
    for device in &devices {
        builder.device(device);
    }
    for device in &devices {
        builder.ports(device);
    }

    Scene {
        transform: view.transform(),
        background: Some(ctx.theme.background),
        commands: builder.commands,
    }
}

struct SceneBuilder<'c, 'a> {
    ctx: &'c RenderContext<'a>,
    zoom: f64,
    commands: Vec<DrawCommand>,
}

impl<'a> SceneBuilder<'_, 'a> {
    fn push(&mut self, layer: Layer, item: Option<ItemRef>, primitive: Primitive) {
        self.commands.push(DrawCommand { layer, item, primitive });
    }

    /// Screen-pixel width converted to world units.
    fn px(&self, width: f64) -> f64 {
        width / self.zoom
    }

    /// Devices as displayed, with an in-progress drag applied.
    fn devices_with_previews(&self) -> Vec<Cow<'a, Device>> {
        self.ctx
            .model
            .devices()
            .iter()
            .map(|device| {
                let preview = self
                    .ctx
                    .controller
                    .and_then(|c| c.preview_position(&ItemRef::Device(device.id.clone())));
                match preview {
                    Some(position) => {
                        let mut moved = device.clone();
                        moved.position = position;
                        Cow::Owned(moved)
                    }
                    None => Cow::Borrowed(device),
                }
            })
            .collect()
    }

    /// Groups as displayed, with an in-progress drag or resize applied.
    fn groups_with_previews(&self) -> Vec<Cow<'a, Group>> {
        self.ctx
            .model
            .groups()
            .iter()
            .map(|group| {
                let Some(controller) = self.ctx.controller else {
                    return Cow::Borrowed(group);
                };
                let position = controller.preview_position(&ItemRef::Group(group.id.clone()));
                let size = controller.preview_group_size(&group.id);
                if position.is_none() && size.is_none() {
                    return Cow::Borrowed(group);
                }
                let mut preview = group.clone();
                if let Some(position) = position {
                    preview.position = position;
                }
                if let Some(size) = size {
                    preview.size = size;
                }
                Cow::Owned(preview)
            })
            .collect()
    }

    fn group(&mut self, group: &Group) {
        let theme = self.ctx.theme;
        let item = ItemRef::Group(group.id.clone());
        let selected = self.ctx.is_selected(&item);
        let bounds = group.bounds();

        self.push(
            Layer::Groups,
            Some(item.clone()),
            Primitive::FillRect {
                rect: bounds,
                radius: 4.0,
                color: theme.group_fill,
            },
        );
        self.push(
            Layer::Groups,
            Some(item.clone()),
            Primitive::StrokeRect {
                rect: bounds,
                radius: 4.0,
                width: self.px(if selected { theme.selected_stroke_width } else { theme.stroke_width }),
                color: if selected { theme.selection } else { theme.group_stroke },
            },
        );
        if !group.name.is_empty() {
            self.push(
                Layer::Groups,
                Some(item.clone()),
                Primitive::Label {
                    text: group.name.clone(),
                    position: Point::new(bounds.x0 + 8.0, bounds.y0 + 16.0),
                    size: theme.label_size,
                    color: theme.label,
                },
            );
        }
        let handle = group.resize_handle(self.ctx.model.resize_handle_size());
        self.push(
            Layer::Groups,
            Some(item),
            Primitive::FillRect {
                rect: handle,
                radius: 0.0,
                color: theme.group_stroke,
            },
        );
    }

    fn connection(&mut self, connection: &Connection, devices: &[Cow<'_, Device>]) {
        let find = |id: &str| devices.iter().find(|d| d.id == id);
        let (Some(source), Some(target)) = (find(&connection.source.device_id), find(&connection.target.device_id))
        else {
            log::debug!("Skipping connection {} with a missing device", connection.id);
            return;
        };

        let (path, midpoint) = match self.ctx.model.link_style() {
            LinkStyle::Curved => {
                let curve = geometry::connection_curve(
                    geometry::port_anchor(source, &connection.source.port_id),
                    geometry::port_anchor(target, &connection.target.port_id),
                );
                (curve.to_path(), curve.midpoint())
            }
            LinkStyle::Straight => {
                let link = geometry::straight_link(source, target);
                (link.to_path(), link.midpoint())
            }
        };

        let theme = self.ctx.theme;
        let item = ItemRef::Connection(connection.id.clone());
        let selected = self.ctx.is_selected(&item);
        self.push(
            Layer::Connections,
            Some(item.clone()),
            Primitive::StrokePath {
                path,
                width: self.px(if selected { theme.selected_stroke_width } else { theme.stroke_width }),
                color: if selected { theme.selection } else { theme.connection },
                dashed: false,
            },
        );
        if let Some(bandwidth) = connection.bandwidth.as_ref().filter(|b| !b.is_empty()) {
            self.push(
                Layer::Connections,
                Some(item.clone()),
                Primitive::Label {
                    text: bandwidth.clone(),
                    position: midpoint,
                    size: theme.label_size,
                    color: theme.label,
                },
            );
        }
        if selected {
            self.push(
                Layer::Connections,
                Some(item),
                Primitive::DeleteAffordance {
                    center: midpoint,
                    radius: self.px(8.0),
                    color: theme.delete_affordance,
                    connection_id: connection.id.clone(),
                },
            );
        }
    }

    fn draft(&mut self, devices: &[Cow<'_, Device>]) {
        let Some(draft) = self.ctx.controller.and_then(|c| c.link_draft()) else {
            return;
        };
        let Some(source) = devices.iter().find(|d| d.id == draft.source.device_id) else {
            return;
        };
        let anchor = geometry::port_anchor(source, &draft.source.port_id);
        let path = match self.ctx.model.link_style() {
            LinkStyle::Curved => geometry::connection_curve(anchor, draft.cursor).to_path(),
            LinkStyle::Straight => {
                let mut path = BezPath::new();
                path.move_to(anchor);
                path.line_to(draft.cursor);
                path
            }
        };
        self.push(
            Layer::Draft,
            None,
            Primitive::StrokePath {
                path,
                width: self.px(self.ctx.theme.selected_stroke_width),
                color: self.ctx.theme.draft,
                dashed: true,
            },
        );
    }

    fn device(&mut self, device: &Device) {
        let theme = self.ctx.theme;
        let item = ItemRef::Device(device.id.clone());
        let bounds = device.bounds();

        self.push(
            Layer::Devices,
            Some(item.clone()),
            Primitive::FillRect {
                rect: bounds,
                radius: 6.0,
                color: theme.device_fill,
            },
        );
        self.push(
            Layer::Devices,
            Some(item.clone()),
            Primitive::StrokeRect {
                rect: bounds,
                radius: 6.0,
                width: self.px(theme.stroke_width),
                color: theme.device_stroke,
            },
        );
        self.push(
            Layer::Devices,
            Some(item.clone()),
            Primitive::Circle {
                center: Point::new(bounds.x1 - 8.0, bounds.y0 + 8.0),
                radius: self.px(theme.status_radius),
                color: theme.status_color(device.status),
            },
        );
        if self.ctx.is_selected(&item) {
            let pad = self.px(3.0);
            self.push(
                Layer::Devices,
                Some(item.clone()),
                Primitive::StrokeRect {
                    rect: bounds.inflate(pad, pad),
                    radius: 8.0,
                    width: self.px(theme.selected_stroke_width),
                    color: theme.selection,
                },
            );
        }
        self.push(
            Layer::Devices,
            Some(item),
            Primitive::Label {
                text: device.name.clone(),
                position: bounds.center(),
                size: theme.label_size,
                color: theme.label,
            },
        );
    }

    fn ports(&mut self, device: &Device) {
        let theme = self.ctx.theme;
        let radius = self.px(theme.port_radius);
        for (index, port) in device.ports.iter().enumerate() {
            self.push(
                Layer::Ports,
                Some(ItemRef::Device(device.id.clone())),
                Primitive::Circle {
                    center: geometry::port_anchor_at(device, index),
                    radius,
                    color: theme.status_color(port.status),
                },
            );
        }
    }
}
