use archview_core::{
    ArchViewerExtraContent, ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType, Orientation,
    ViewerDefaults,
};

use super::descriptors::{base_option_data, CategoryKind, OptionValue, SectionKind, UiElementData};
use super::rules::mark_selected;
use crate::subscription::Signal;
use crate::{GuiError, GuiResult};

/// Current viewer options, one behaviour signal per option.
pub struct ArchViewerOptionsService {
    hierarchy: Signal<ArchViewerHierarchy>,
    orientation: Signal<Orientation>,
    node_type: Signal<ArchViewerNodeType>,
    viewer_type: Signal<ArchViewerType>,
    extra_content: Signal<ArchViewerExtraContent>,
}

impl ArchViewerOptionsService {
    pub fn new(defaults: ViewerDefaults) -> Self {
        Self {
            hierarchy: Signal::with_value(defaults.hierarchy),
            orientation: Signal::with_value(defaults.orientation),
            node_type: Signal::with_value(defaults.node_type),
            viewer_type: Signal::with_value(defaults.viewer_type),
            extra_content: Signal::with_value(defaults.extra_content),
        }
    }

    pub const fn viewer_hierarchy(&self) -> &Signal<ArchViewerHierarchy> {
        &self.hierarchy
    }

    pub const fn viewer_orientation(&self) -> &Signal<Orientation> {
        &self.orientation
    }

    pub const fn viewer_node_type(&self) -> &Signal<ArchViewerNodeType> {
        &self.node_type
    }

    pub const fn viewer_type(&self) -> &Signal<ArchViewerType> {
        &self.viewer_type
    }

    pub const fn viewer_extra_content(&self) -> &Signal<ArchViewerExtraContent> {
        &self.extra_content
    }

    /// Snapshot of every current value.
    pub fn current(&self) -> GuiResult<ViewerDefaults> {
        fn current<T: Clone + Send + 'static>(signal: &Signal<T>) -> GuiResult<T> {
            signal
                .value()?
                .ok_or_else(|| GuiError::State("Option signal has no value".to_string()))
        }

        Ok(ViewerDefaults {
            hierarchy: current(&self.hierarchy)?,
            orientation: current(&self.orientation)?,
            node_type: current(&self.node_type)?,
            viewer_type: current(&self.viewer_type)?,
            extra_content: current(&self.extra_content)?,
        })
    }

    /// Option list with every option enabled and the current values selected.
    pub fn option_data_for_runtime_structure(&self) -> GuiResult<UiElementData> {
        let current = self.current()?;
        let mut data = base_option_data();
        mark_selected(
            &mut data,
            &[
                OptionValue::Hierarchy(current.hierarchy),
                OptionValue::Orientation(current.orientation),
                OptionValue::NodeType(current.node_type),
                OptionValue::ViewerType(current.viewer_type),
                OptionValue::ExtraContent(current.extra_content),
            ],
        );
        Ok(data)
    }

    /// Set one option. Emits only when the value actually changes.
    pub fn change_option(
        &self,
        section: SectionKind,
        category: CategoryKind,
        option: OptionValue,
    ) -> GuiResult<()> {
        if option.category() != category {
            return Err(GuiError::Ui(format!(
                "Option {option:?} does not belong to category {category:?}"
            )));
        }
        tracing::debug!(section = section.as_str(), ?option, "changing viewer option");

        match option {
            OptionValue::Hierarchy(value) => emit_changed(&self.hierarchy, value),
            OptionValue::Orientation(value) => emit_changed(&self.orientation, value),
            OptionValue::NodeType(value) => emit_changed(&self.node_type, value),
            OptionValue::ViewerType(value) => emit_changed(&self.viewer_type, value),
            OptionValue::ExtraContent(value) => emit_changed(&self.extra_content, value),
        }
    }
}

impl Default for ArchViewerOptionsService {
    fn default() -> Self {
        Self::new(ViewerDefaults::default())
    }
}

fn emit_changed<T>(signal: &Signal<T>, value: T) -> GuiResult<()>
where
    T: Clone + PartialEq + Send + 'static,
{
    if signal.value()?.as_ref() == Some(&value) {
        return Ok(());
    }
    signal.emit(value)
}
