pub mod app;
pub mod crowd_marker;
pub mod map_view;
pub mod scale_indicator;
pub mod spot_popup;
pub mod status_legend;
pub mod zoom_controls;
