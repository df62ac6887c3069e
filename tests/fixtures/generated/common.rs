// Generated by mdlc. Do not edit.
#![allow(dead_code, unused_imports, non_camel_case_types, clippy::new_without_default)]

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    #[default]
    Red,
    Blue,
}

pub mod common {
    use super::*;

    pub mod panel {
        use super::*;

        pub struct Entry {
            base: ::mdl_runtime::ModelBase<Entry>,
            text: String,
        }

        impl Entry {
            pub fn new() -> Self {
                let base = ::mdl_runtime::ModelBase::new();
                Self {
                    base,
                    text: Default::default(),
                }
            }

            pub fn text(&self) -> &str {
                &self.text
            }

            pub fn set_text(&mut self, value: String) {
                if self.text != value {
                    self.text = value;
                    self.base.self_changed();
                    self.base.notify_parent();
                }
            }
        }

        impl Default for Entry {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::mdl_runtime::Model for Entry {
            fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
                &self.base
            }

            fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
                &mut self.base
            }
        }
    }

    pub struct Panel {
        base: ::mdl_runtime::ModelBase<Panel>,
        entries: ::mdl_runtime::ModelList<panel::Entry>,
    }

    impl Panel {
        pub fn new() -> Self {
            let base = ::mdl_runtime::ModelBase::new();
            let entries = ::mdl_runtime::ModelList::new();
            ::mdl_runtime::Model::base(&entries).attach_to(&base);
            Self {
                base,
                entries,
            }
        }

        pub fn entries(&self) -> &::mdl_runtime::ModelList<panel::Entry> {
            &self.entries
        }

        pub fn entries_mut(&mut self) -> &mut ::mdl_runtime::ModelList<panel::Entry> {
            ::mdl_runtime::Model::base(&self.entries).attach_to(&self.base);
            &mut self.entries
        }
    }

    impl Default for Panel {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ::mdl_runtime::Model for Panel {
        fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
            &mut self.base
        }

        fn force_mark_dirty(&mut self) {
            self.base.mark_dirty();
            ::mdl_runtime::Model::force_mark_dirty(&mut self.entries);
        }

        fn invoke_callbacks_on_children(
            &mut self,
            force: bool,
            on_error: &mut dyn FnMut(::mdl_runtime::ObserverFailure),
        ) {
            ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.entries, force, on_error);
        }
    }

    impl ::mdl_runtime::BindTarget for Panel {}

    pub struct Inner {
        base: ::mdl_runtime::ModelBase<Inner>,
        x: i32,
    }

    impl Inner {
        pub fn new() -> Self {
            let base = ::mdl_runtime::ModelBase::new();
            Self {
                base,
                x: Default::default(),
            }
        }

        pub fn x(&self) -> i32 {
            self.x
        }

        pub fn set_x(&mut self, value: i32) {
            if self.x != value {
                self.x = value;
                self.base.self_changed();
                self.base.notify_parent();
            }
        }
    }

    impl Default for Inner {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ::mdl_runtime::Model for Inner {
        fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
            &mut self.base
        }
    }
}

pub struct Common {
    base: ::mdl_runtime::ModelBase<Common>,
    label: String,
    inner: common::Inner,
}

impl Common {
    pub fn new() -> Self {
        let base = ::mdl_runtime::ModelBase::new();
        let inner = common::Inner::new();
        ::mdl_runtime::Model::base(&inner).attach_to(&base);
        Self {
            base,
            label: Default::default(),
            inner,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, value: String) {
        if self.label != value {
            self.label = value;
            self.base.self_changed();
            self.base.notify_parent();
        }
    }

    pub fn inner(&self) -> &common::Inner {
        &self.inner
    }

    /// Replace the value through `set_inner`, which carries its observers over.
    pub fn inner_mut(&mut self) -> &mut common::Inner {
        ::mdl_runtime::Model::base(&self.inner).attach_to(&self.base);
        &mut self.inner
    }

    pub fn set_inner(&mut self, value: common::Inner) -> common::Inner {
        let previous = ::mdl_runtime::transplant(&mut self.inner, value);
        self.base.self_changed();
        self.base.notify_parent();
        previous
    }
}

impl Default for Common {
    fn default() -> Self {
        Self::new()
    }
}

impl ::mdl_runtime::Model for Common {
    fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
        &mut self.base
    }

    fn force_mark_dirty(&mut self) {
        self.base.mark_dirty();
        ::mdl_runtime::Model::force_mark_dirty(&mut self.inner);
    }

    fn invoke_callbacks_on_children(
        &mut self,
        force: bool,
        on_error: &mut dyn FnMut(::mdl_runtime::ObserverFailure),
    ) {
        ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.inner, force, on_error);
    }
}

pub mod locators {
    use super::*;

    pub mod common_locators {
        pub struct PanelLocator {
            pub entries: ::mdl_runtime::ListModelLocator<super::super::common::Panel, super::super::common::panel::Entry>,
        }

        impl PanelLocator {
            pub fn new() -> Self {
                Self {
                    entries: ::mdl_runtime::ListModelLocator::new(
                        |model: &super::super::common::Panel| model.entries(),
                        |model: &mut super::super::common::Panel| model.entries_mut(),
                    ),
                }
            }
        }

        impl ::mdl_runtime::Locate<super::super::common::Panel> for PanelLocator {
            type Target = super::super::common::Panel;

            fn locate<'a>(&self, root: &'a super::super::common::Panel) -> Option<&'a Self::Target> {
                Some(root)
            }

            fn locate_mut<'a>(&self, root: &'a mut super::super::common::Panel) -> Option<&'a mut Self::Target> {
                Some(root)
            }
        }
    }

    pub mod common_bind_targets {
        pub static PANEL: ::std::sync::LazyLock<super::common_locators::PanelLocator> = ::std::sync::LazyLock::new(super::common_locators::PanelLocator::new);
    }
}
