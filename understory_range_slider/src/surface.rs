// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface a slider draws into.
//!
//! The slider never touches a real document. It talks to a [`Surface`], which creates and
//! appends elements, writes `left`/`right` style properties, toggles CSS classes, reports laid
//! out widths and scroll offsets, and registers the page-level listeners a drag needs.
//! Hosts implement it on top of their DOM binding or scene graph; [`MemorySurface`] is a small
//! in-memory implementation for tests, demos, and headless use.
//!
//! The slider builds this structure inside the container it is given:
//!
//! ```text
//! div.slider[.one-way]
//! ├── div.handle.handle-left
//! │   └── div.slider-circle
//! ├── div.handle.handle-right
//! │   └── div.slider-circle
//! └── div.slider-fill
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Vec2;

bitflags::bitflags! {
    /// CSS classes the slider puts on its elements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ClassSet: u16 {
        /// `slider`: the root element.
        const SLIDER       = 1 << 0;
        /// `one-way`: the root of a single-handle slider.
        const ONE_WAY      = 1 << 1;
        /// `handle`: either handle container.
        const HANDLE       = 1 << 2;
        /// `handle-left`: the left handle container.
        const HANDLE_LEFT  = 1 << 3;
        /// `handle-right`: the right handle container.
        const HANDLE_RIGHT = 1 << 4;
        /// `slider-circle`: the decorative element inside a handle.
        const CIRCLE       = 1 << 5;
        /// `slider-fill`: the bar between the handles.
        const FILL         = 1 << 6;
        /// `slider-transition`: animate position changes. Set by programmatic moves and
        /// cleared while dragging.
        const TRANSITION   = 1 << 7;
        /// `ontop`: the most recently dragged handle, stacked above its sibling.
        const ONTOP        = 1 << 8;
        /// `slider-disabled`: the slider ignores drags.
        const DISABLED     = 1 << 9;
    }
}

const CLASS_NAMES: [(ClassSet, &str); 10] = [
    (ClassSet::SLIDER, "slider"),
    (ClassSet::ONE_WAY, "one-way"),
    (ClassSet::HANDLE, "handle"),
    (ClassSet::HANDLE_LEFT, "handle-left"),
    (ClassSet::HANDLE_RIGHT, "handle-right"),
    (ClassSet::CIRCLE, "slider-circle"),
    (ClassSet::FILL, "slider-fill"),
    (ClassSet::TRANSITION, "slider-transition"),
    (ClassSet::ONTOP, "ontop"),
    (ClassSet::DISABLED, "slider-disabled"),
];

impl ClassSet {
    /// CSS class names of the set flags, in declaration order.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        CLASS_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }

    /// The set as a space-separated `class` attribute value.
    #[must_use]
    pub fn to_class_attr(self) -> String {
        let mut attr = String::new();
        for name in self.class_names() {
            if !attr.is_empty() {
                attr.push(' ');
            }
            attr.push_str(name);
        }
        attr
    }
}

/// Style properties the slider writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleProp {
    /// `left`
    Left,
    /// `right`
    Right,
    /// `margin-left`
    MarginLeft,
    /// `margin-right`
    MarginRight,
}

impl StyleProp {
    /// The CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::MarginLeft => "margin-left",
            Self::MarginRight => "margin-right",
        }
    }
}

bitflags::bitflags! {
    /// Page-level events a drag listens to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PageEvents: u8 {
        /// `mousemove`
        const MOUSE_MOVE = 1 << 0;
        /// `mouseup`
        const MOUSE_UP   = 1 << 1;
        /// `touchmove`
        const TOUCH_MOVE = 1 << 2;
        /// `touchend`
        const TOUCH_END  = 1 << 3;
    }
}

/// How page-level listeners are registered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenMode {
    /// Standard capture-phase registration.
    Capture,
    /// Legacy engines' attach-style registration, which has no capture phase.
    Attach,
}

/// Where a scroll offset is read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollSource {
    /// The window's scroll position.
    Window,
    /// The document element's scroll position (legacy engines).
    DocumentElement,
    /// The body's scroll position (legacy engines).
    Body,
}

/// The rendering collaborator of a slider.
///
/// `Node` is whatever cheap handle the host uses for elements.
pub trait Surface {
    /// Element handle.
    type Node: Copy + Eq + Hash + Debug;

    /// Whether `node` can host a slider (a block-level container).
    fn is_block_container(&self, node: Self::Node) -> bool;

    /// Creates a detached element.
    fn create_element(&mut self) -> Self::Node;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Sets an inline style property.
    fn set_style(&mut self, node: Self::Node, prop: StyleProp, value: &str);

    /// Adds one class.
    fn add_class(&mut self, node: Self::Node, class: &str);

    /// Removes one class.
    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Replaces the whole `class` attribute.
    fn set_class_attr(&mut self, node: Self::Node, classes: &str);

    /// Laid-out width of `node`, in pixels.
    fn offset_width(&self, node: Self::Node) -> f64;

    /// Current scroll offset of `source`.
    fn scroll_offset(&self, source: ScrollSource) -> Vec2;

    /// Starts delivering `events` from the whole page to the slider.
    fn listen_page(&mut self, events: PageEvents, mode: ListenMode);

    /// Stops delivering `events` registered with `mode`.
    fn unlisten_page(&mut self, events: PageEvents, mode: ListenMode);
}

/// Element handle of a [`MemorySurface`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoryNodeId(usize);

/// One element of a [`MemorySurface`].
#[derive(Clone, Debug, Default)]
pub struct MemoryNode {
    /// Block-level container.
    pub block: bool,
    /// Parent element, once appended.
    pub parent: Option<MemoryNodeId>,
    /// Children, in append order.
    pub children: Vec<MemoryNodeId>,
    /// Classes, in the order they were added.
    pub classes: Vec<String>,
    /// Inline styles, in the order they were first set.
    pub styles: Vec<(StyleProp, String)>,
    /// Explicit width, used unless a layout rule applies.
    pub width: f64,
}

/// An in-memory [`Surface`] with a fixed, tiny layout model.
///
/// Elements carrying `slider` report the configured track width and elements carrying
/// `handle` report the configured handle width; everything else reports its own
/// [`MemoryNode::width`].
///
/// ```
/// use understory_range_slider::surface::{MemorySurface, StyleProp, Surface};
///
/// let mut surface = MemorySurface::new(200.0, 10.0);
/// let container = surface.add_block(200.0);
/// let child = surface.create_element();
/// surface.append_child(container, child);
/// surface.set_style(child, StyleProp::Left, "25%");
///
/// assert_eq!(surface.style(child, StyleProp::Left), Some("25%"));
/// assert_eq!(surface.node(container).children, [child]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<MemoryNode>,
    track_width: f64,
    handle_width: f64,
    scroll: [Vec2; 3],
    listeners: Vec<(PageEvents, ListenMode)>,
}

impl MemorySurface {
    /// Creates an empty surface with the given slider track and handle widths.
    #[must_use]
    pub fn new(track_width: f64, handle_width: f64) -> Self {
        Self {
            track_width,
            handle_width,
            ..Self::default()
        }
    }

    /// Adds a detached block-level container.
    pub fn add_block(&mut self, width: f64) -> MemoryNodeId {
        self.push(MemoryNode {
            block: true,
            width,
            ..MemoryNode::default()
        })
    }

    /// Adds a detached inline element.
    pub fn add_inline(&mut self) -> MemoryNodeId {
        self.push(MemoryNode::default())
    }

    /// Changes the slider track width.
    pub fn set_track_width(&mut self, width: f64) {
        self.track_width = width;
    }

    /// Changes the handle width.
    pub fn set_handle_width(&mut self, width: f64) {
        self.handle_width = width;
    }

    /// Sets the scroll offset reported for `source`.
    pub fn set_scroll(&mut self, source: ScrollSource, offset: Vec2) {
        self.scroll[scroll_index(source)] = offset;
    }

    /// The element behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` comes from another surface.
    #[must_use]
    pub fn node(&self, id: MemoryNodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    /// Whether `id` carries `class`.
    #[must_use]
    pub fn has_class(&self, id: MemoryNodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    /// Current value of an inline style property.
    #[must_use]
    pub fn style(&self, id: MemoryNodeId, prop: StyleProp) -> Option<&str> {
        self.nodes[id.0]
            .styles
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Page events currently registered, across all modes.
    #[must_use]
    pub fn listening(&self) -> PageEvents {
        self.listeners
            .iter()
            .fold(PageEvents::empty(), |acc, (events, _)| acc | *events)
    }

    /// Registered listener sets with their modes, in registration order.
    #[must_use]
    pub fn listeners(&self) -> &[(PageEvents, ListenMode)] {
        &self.listeners
    }

    fn push(&mut self, node: MemoryNode) -> MemoryNodeId {
        self.nodes.push(node);
        MemoryNodeId(self.nodes.len() - 1)
    }
}

fn scroll_index(source: ScrollSource) -> usize {
    match source {
        ScrollSource::Window => 0,
        ScrollSource::DocumentElement => 1,
        ScrollSource::Body => 2,
    }
}

impl Surface for MemorySurface {
    type Node = MemoryNodeId;

    fn is_block_container(&self, node: MemoryNodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|n| n.block)
    }

    fn create_element(&mut self) -> MemoryNodeId {
        self.push(MemoryNode {
            block: true,
            ..MemoryNode::default()
        })
    }

    fn append_child(&mut self, parent: MemoryNodeId, child: MemoryNodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn set_style(&mut self, node: MemoryNodeId, prop: StyleProp, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        match styles.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => styles.push((prop, value.into())),
        }
    }

    fn add_class(&mut self, node: MemoryNodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.into());
        }
    }

    fn remove_class(&mut self, node: MemoryNodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn set_class_attr(&mut self, node: MemoryNodeId, classes: &str) {
        self.nodes[node.0].classes = classes.split_whitespace().map(String::from).collect();
    }

    fn offset_width(&self, node: MemoryNodeId) -> f64 {
        if self.has_class(node, "slider") {
            self.track_width
        } else if self.has_class(node, "handle") {
            self.handle_width
        } else {
            self.nodes[node.0].width
        }
    }

    fn scroll_offset(&self, source: ScrollSource) -> Vec2 {
        self.scroll[scroll_index(source)]
    }

    fn listen_page(&mut self, events: PageEvents, mode: ListenMode) {
        self.listeners.push((events, mode));
    }

    fn unlisten_page(&mut self, events: PageEvents, mode: ListenMode) {
        self.listeners.retain(|(e, m)| !(*e == events && *m == mode));
    }
}
