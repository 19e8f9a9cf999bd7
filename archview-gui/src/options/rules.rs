//! Enablement rules for incompatible option combinations.
//!
//! Rules are applied to a copy of the pristine list on every derivation, so an
//! option disabled for one combination is enabled again for the next.

use archview_core::{ArchViewerExtraContent, ArchViewerHierarchy, Orientation};

use super::descriptors::{options_mut, OptionValue, UiElementData};

fn set_disabled(data: &mut UiElementData, value: OptionValue, disabled: bool) {
    for option in options_mut(data).filter(|option| option.value == value) {
        option.disabled = disabled;
    }
}

pub fn disable_orientation_left_to_right(data: &mut UiElementData, disabled: bool) {
    set_disabled(
        data,
        OptionValue::Orientation(Orientation::LeftToRight),
        disabled,
    );
}

pub fn disable_extra_content_service_provider(data: &mut UiElementData, disabled: bool) {
    set_disabled(
        data,
        OptionValue::ExtraContent(ArchViewerExtraContent::LayerServiceProvider),
        disabled,
    );
}

/// Toggle the combined "Injector + Dependency" hierarchy.
pub fn disable_injector_and_dependency_hierarchy(data: &mut UiElementData, disabled: bool) {
    set_disabled(
        data,
        OptionValue::Hierarchy(ArchViewerHierarchy::FullView),
        disabled,
    );
}

/// Option list for the current (hierarchy, orientation, extra content).
///
/// Only the injector hierarchy and the full view constrain other options.
pub fn derive_option_data(
    base: &UiElementData,
    hierarchy: ArchViewerHierarchy,
    orientation: Orientation,
    extra_content: ArchViewerExtraContent,
) -> UiElementData {
    let mut data = base.clone();

    if matches!(
        hierarchy,
        ArchViewerHierarchy::InjectorHierarchy | ArchViewerHierarchy::FullView
    ) {
        let injector = hierarchy == ArchViewerHierarchy::InjectorHierarchy;
        disable_orientation_left_to_right(&mut data, injector);
        disable_extra_content_service_provider(&mut data, injector);
        disable_injector_and_dependency_hierarchy(
            &mut data,
            orientation == Orientation::LeftToRight
                || extra_content == ArchViewerExtraContent::LayerServiceProvider,
        );
    }

    data
}

/// Mark exactly the options in `selected` as selected.
pub fn mark_selected(data: &mut UiElementData, selected: &[OptionValue]) {
    for option in options_mut(data) {
        option.selected = selected.contains(&option.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::descriptors::{base_option_data, find_option, is_option_disabled};

    const LEFT_TO_RIGHT: OptionValue = OptionValue::Orientation(Orientation::LeftToRight);
    const SERVICE_PROVIDER: OptionValue =
        OptionValue::ExtraContent(ArchViewerExtraContent::LayerServiceProvider);
    const FULL_VIEW: OptionValue = OptionValue::Hierarchy(ArchViewerHierarchy::FullView);

    #[test]
    fn test_injector_hierarchy_always_disables_left_to_right() {
        let base = base_option_data();
        for orientation in Orientation::all() {
            for extra in ArchViewerExtraContent::all() {
                let data = derive_option_data(
                    &base,
                    ArchViewerHierarchy::InjectorHierarchy,
                    orientation,
                    extra,
                );
                assert!(
                    is_option_disabled(&data, LEFT_TO_RIGHT),
                    "{orientation:?}/{extra:?}"
                );
                assert!(is_option_disabled(&data, SERVICE_PROVIDER));
            }
        }
    }

    #[test]
    fn test_full_view_disabled_iff_left_to_right_or_service_provider() {
        let base = base_option_data();
        for orientation in Orientation::all() {
            for extra in ArchViewerExtraContent::all() {
                let data =
                    derive_option_data(&base, ArchViewerHierarchy::FullView, orientation, extra);
                let expected = orientation == Orientation::LeftToRight
                    || extra == ArchViewerExtraContent::LayerServiceProvider;
                assert_eq!(
                    is_option_disabled(&data, FULL_VIEW),
                    expected,
                    "{orientation:?}/{extra:?}"
                );
                assert!(!is_option_disabled(&data, LEFT_TO_RIGHT));
                assert!(!is_option_disabled(&data, SERVICE_PROVIDER));
            }
        }
    }

    #[test]
    fn test_other_hierarchies_leave_list_untouched() {
        let base = base_option_data();
        for hierarchy in [
            ArchViewerHierarchy::DependencyDiagram,
            ArchViewerHierarchy::ComponentHierarchy,
            ArchViewerHierarchy::RoutingHierarchy,
        ] {
            let data = derive_option_data(
                &base,
                hierarchy,
                Orientation::LeftToRight,
                ArchViewerExtraContent::LayerServiceProvider,
            );
            assert_eq!(data, base);
        }
    }

    #[test]
    fn test_derivation_starts_from_pristine_list() {
        let base = base_option_data();
        let injector = derive_option_data(
            &base,
            ArchViewerHierarchy::InjectorHierarchy,
            Orientation::TopToBottom,
            ArchViewerExtraContent::None,
        );
        assert!(is_option_disabled(&injector, LEFT_TO_RIGHT));
        assert!(!is_option_disabled(&base, LEFT_TO_RIGHT));

        let dependency = derive_option_data(
            &base,
            ArchViewerHierarchy::DependencyDiagram,
            Orientation::TopToBottom,
            ArchViewerExtraContent::None,
        );
        assert!(!is_option_disabled(&dependency, LEFT_TO_RIGHT));
    }

    #[test]
    fn test_mark_selected() {
        let mut data = base_option_data();
        mark_selected(&mut data, &[LEFT_TO_RIGHT, FULL_VIEW]);
        assert!(find_option(&data, LEFT_TO_RIGHT).unwrap().selected);
        assert!(find_option(&data, FULL_VIEW).unwrap().selected);
        assert!(
            !find_option(&data, OptionValue::Orientation(Orientation::TopToBottom))
                .unwrap()
                .selected
        );

        mark_selected(&mut data, &[]);
        assert!(!find_option(&data, LEFT_TO_RIGHT).unwrap().selected);
    }
}
