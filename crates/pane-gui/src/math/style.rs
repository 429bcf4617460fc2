//! Frame style constants

/// Frame style constants for window chrome and layering
pub struct FrameStyle {
    /// Title bar height of a decorated window
    pub title_bar_height: i32,
    /// Border width of a decorated window
    pub border_width: i32,
    /// Control button width
    pub button_width: i32,
    /// Control button height
    pub button_height: i32,
    /// Width of the resize hot zone outside each edge
    pub resize_range: i32,
    /// Smallest width a window can be resized to
    pub min_window_width: i32,
    /// Smallest height a window can be resized to
    pub min_window_height: i32,
    /// Layers a widget sits above its window
    pub object_layer_factor: i32,
    /// Layers a nested window sits above its parent
    pub subwindow_layer_factor: i32,
    /// Horizontal inset of the title text
    pub title_inset: i32,
}

/// Default frame style
pub const FRAME_STYLE: FrameStyle = FrameStyle {
    title_bar_height: 34,
    border_width: 1,
    button_width: 58,
    button_height: 32,
    resize_range: 10,
    min_window_width: 225,
    min_window_height: 225,
    object_layer_factor: 1,
    subwindow_layer_factor: 2,
    title_inset: 4,
};
