//! Property test for `ServiceAdapter::qualify`'s module/global split.

use proptest::prelude::*;
use seedmaster_core::{EngineId, PolicyRegistry};
use seedmaster_service::{Phase, ServiceAdapter};

fn adapter() -> ServiceAdapter {
    let tree: toml::Value = "policy = \"autoIncrement\"\nbaseSeed = 0\ncheckRange = false\n"
        .parse()
        .unwrap();
    ServiceAdapter::new(PolicyRegistry::new().build(&tree).unwrap())
}

proptest! {
    /// Qualifying as global never consults the current module, for any
    /// instance name and regardless of whether a module happens to be set.
    #[test]
    fn global_qualification_ignores_the_current_module(
        instance in "[a-zA-Z0-9_]{0,16}",
        module in proptest::option::of("[a-zA-Z0-9_]{1,16}"),
    ) {
        let mut a = adapter();
        if let Some(m) = &module {
            a.enter_module(m.clone());
        }
        let id = a.qualify(&instance, true).unwrap();
        prop_assert_eq!(id, EngineId::global(instance));
    }

    /// Qualifying as module-scoped with a current module set always
    /// produces `EngineId::module(current_module, instance)`.
    #[test]
    fn module_qualification_uses_the_current_module_label(
        instance in "[a-zA-Z0-9_]{0,16}",
        module in "[a-zA-Z0-9_]{1,16}",
    ) {
        let mut a = adapter();
        a.state_transition(Phase::InServiceConstructor).unwrap();
        a.state_transition(Phase::InModuleConstructor).unwrap();
        a.enter_module(module.clone());
        let id = a.qualify(&instance, false).unwrap();
        prop_assert_eq!(id, EngineId::module(module, instance));
    }

    /// Qualifying as module-scoped with no current module is always a
    /// logic error, never a panic or a silently-wrong id.
    #[test]
    fn module_qualification_without_a_current_module_always_errors(
        instance in "[a-zA-Z0-9_]{0,16}",
    ) {
        let a = adapter();
        let err = a.qualify(&instance, false).unwrap_err();
        prop_assert_eq!(err.error_code(), "S2005");
    }
}
