//! Option descriptor list shown in the viewer's side panel.

use archview_core::{
    ArchViewerExtraContent, ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType, Orientation,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hierarchies,
    Display,
    ExtraContent,
}

impl SectionKind {
    /// Type tag of the section.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchies => "hierarchies",
            Self::Display => "display",
            Self::ExtraContent => "extra_content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Hierarchy,
    Orientation,
    NodeType,
    ViewerType,
    ExtraContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum OptionValue {
    Hierarchy(ArchViewerHierarchy),
    Orientation(Orientation),
    NodeType(ArchViewerNodeType),
    ViewerType(ArchViewerType),
    ExtraContent(ArchViewerExtraContent),
}

impl OptionValue {
    pub const fn category(self) -> CategoryKind {
        match self {
            Self::Hierarchy(_) => CategoryKind::Hierarchy,
            Self::Orientation(_) => CategoryKind::Orientation,
            Self::NodeType(_) => CategoryKind::NodeType,
            Self::ViewerType(_) => CategoryKind::ViewerType,
            Self::ExtraContent(_) => CategoryKind::ExtraContent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hierarchy(value) => value.display_name(),
            Self::Orientation(value) => value.display_name(),
            Self::NodeType(value) => value.display_name(),
            Self::ViewerType(value) => value.display_name(),
            Self::ExtraContent(value) => value.display_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiOption {
    pub value: OptionValue,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

impl UiOption {
    pub fn new(value: OptionValue) -> Self {
        Self {
            value,
            label: value.label().to_string(),
            selected: false,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCategory {
    pub kind: CategoryKind,
    pub title: String,
    pub options: Vec<UiOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSection {
    pub kind: SectionKind,
    pub title: String,
    pub categories: Vec<UiCategory>,
}

pub type UiElementData = Vec<UiSection>;

/// A click on one option of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChange {
    pub section: SectionKind,
    pub category: CategoryKind,
    pub option: OptionValue,
}

impl OptionChange {
    /// The change selecting `option`, addressed to the section that lists it.
    pub const fn select(option: OptionValue) -> Self {
        let category = option.category();
        let section = match category {
            CategoryKind::Hierarchy => SectionKind::Hierarchies,
            CategoryKind::Orientation | CategoryKind::NodeType | CategoryKind::ViewerType => {
                SectionKind::Display
            }
            CategoryKind::ExtraContent => SectionKind::ExtraContent,
        };
        Self {
            section,
            category,
            option,
        }
    }
}

/// Hierarchies selectable from the option panel.
pub fn selectable_hierarchies() -> Vec<ArchViewerHierarchy> {
    vec![
        ArchViewerHierarchy::InjectorHierarchy,
        ArchViewerHierarchy::DependencyDiagram,
        ArchViewerHierarchy::FullView,
    ]
}

/// The full option list with everything enabled and nothing selected.
pub fn base_option_data() -> UiElementData {
    fn category(kind: CategoryKind, title: &str, values: Vec<OptionValue>) -> UiCategory {
        UiCategory {
            kind,
            title: title.to_string(),
            options: values.into_iter().map(UiOption::new).collect(),
        }
    }

    vec![
        UiSection {
            kind: SectionKind::Hierarchies,
            title: "Hierarchies".to_string(),
            categories: vec![category(
                CategoryKind::Hierarchy,
                "Hierarchy",
                selectable_hierarchies()
                    .into_iter()
                    .map(OptionValue::Hierarchy)
                    .collect(),
            )],
        },
        UiSection {
            kind: SectionKind::Display,
            title: "Display".to_string(),
            categories: vec![
                category(
                    CategoryKind::Orientation,
                    "Orientation",
                    Orientation::all()
                        .into_iter()
                        .map(OptionValue::Orientation)
                        .collect(),
                ),
                category(
                    CategoryKind::NodeType,
                    "Nodes",
                    ArchViewerNodeType::all()
                        .into_iter()
                        .map(OptionValue::NodeType)
                        .collect(),
                ),
                category(
                    CategoryKind::ViewerType,
                    "Viewer",
                    ArchViewerType::all()
                        .into_iter()
                        .map(OptionValue::ViewerType)
                        .collect(),
                ),
            ],
        },
        UiSection {
            kind: SectionKind::ExtraContent,
            title: "Extra content".to_string(),
            categories: vec![category(
                CategoryKind::ExtraContent,
                "Extra content",
                ArchViewerExtraContent::all()
                    .into_iter()
                    .map(OptionValue::ExtraContent)
                    .collect(),
            )],
        },
    ]
}

pub fn find_option(data: &UiElementData, value: OptionValue) -> Option<&UiOption> {
    data.iter()
        .flat_map(|section| &section.categories)
        .flat_map(|category| &category.options)
        .find(|option| option.value == value)
}

pub(crate) fn options_mut(data: &mut UiElementData) -> impl Iterator<Item = &mut UiOption> {
    data.iter_mut()
        .flat_map(|section| &mut section.categories)
        .flat_map(|category| &mut category.options)
}

/// Whether the list offers `value` but greys it out.
pub fn is_option_disabled(data: &UiElementData, value: OptionValue) -> bool {
    find_option(data, value).is_some_and(|option| option.disabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_option_data_layout() {
        let data = base_option_data();
        let tags: Vec<_> = data.iter().map(|section| section.kind.as_str()).collect();
        assert_eq!(tags, vec!["hierarchies", "display", "extra_content"]);

        let full_view = find_option(
            &data,
            OptionValue::Hierarchy(ArchViewerHierarchy::FullView),
        )
        .unwrap();
        assert_eq!(full_view.label, "Injector + Dependency");
        assert!(find_option(
            &data,
            OptionValue::Hierarchy(ArchViewerHierarchy::RoutingHierarchy)
        )
        .is_none());
        assert!(options_mut(&mut data.clone()).all(|option| !option.disabled && !option.selected));
    }

    #[test]
    fn test_select_routes_to_owning_section() {
        let change = OptionChange::select(OptionValue::Orientation(Orientation::LeftToRight));
        assert_eq!(change.section, SectionKind::Display);
        assert_eq!(change.category, CategoryKind::Orientation);

        let change = OptionChange::select(OptionValue::ExtraContent(
            ArchViewerExtraContent::LayerServiceProvider,
        ));
        assert_eq!(change.section, SectionKind::ExtraContent);
    }
}
