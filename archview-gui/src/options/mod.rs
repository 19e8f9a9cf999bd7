pub mod descriptors;
pub mod rules;
pub mod service;

pub use descriptors::{
    base_option_data, find_option, is_option_disabled, selectable_hierarchies, CategoryKind,
    OptionChange, OptionValue, SectionKind, UiCategory, UiElementData, UiOption, UiSection,
};
pub use rules::{
    derive_option_data, disable_extra_content_service_provider,
    disable_injector_and_dependency_hierarchy, disable_orientation_left_to_right, mark_selected,
};
pub use service::ArchViewerOptionsService;
