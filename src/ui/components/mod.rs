pub mod activity_heatmap;
pub mod drill_list;
pub mod focus_tabs;
pub mod profile_form;
pub mod progress_bar;
pub mod progress_panel;
pub mod weekly_plan;
