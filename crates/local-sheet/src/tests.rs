#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use sheet_core::*;
    use sheet_inject::{Container, InjectError, Module, ScopeHandle, parameters_of};
    use sheet_ui::{Button, Column, Host, SheetProperties, SheetValue, Text, ViewExt};
    use tokio::task::LocalSet;

    use crate::*;

    struct Marker;

    struct Tagged(u32);

    struct TestSheet {
        scope: ScreenScope<Marker>,
        closes: Rc<Cell<u32>>,
    }

    impl TestSheet {
        fn new(container: &Container, name: &str) -> Rc<Self> {
            Rc::new(Self {
                scope: ScreenScope::new(container, name),
                closes: Rc::new(Cell::new(0)),
            })
        }
    }

    impl ScopedScreen for TestSheet {
        fn scope_name(&self) -> &str {
            self.scope.name()
        }

        fn scope(&self) -> Result<ScopeHandle, SheetError> {
            Ok(self.scope.scope()?)
        }

        fn close_scope(&self) {
            self.closes.set(self.closes.get() + 1);
            self.scope.close();
        }
    }

    impl BottomSheet for TestSheet {
        fn content(&self, sheets: &SheetManager) -> View {
            let label = match self.scope.view_model() {
                Ok(_) => format!("sheet {}", self.scope.name()),
                Err(e) => e.to_string(),
            };
            let sheets = sheets.clone();
            Column(Modifier::new()).child((
                Text(label),
                Button("Hide Sheet", move || sheets.hide()),
            ))
        }
    }

    fn container() -> Container {
        Container::start([
            sheet_module(),
            Module::new()
                .scope("sheet_a", |s| {
                    s.scoped(|_| Ok(Marker))
                        .scoped(|r| Ok(Tagged(*r.params().get::<u32>(0)?)))
                })
                .scope("sheet_b", |s| s.scoped(|_| Ok(Marker))),
        ])
    }

    fn fast(policy: ReplacePolicy) -> SheetConfig {
        SheetConfig {
            animation_ms: 100,
            replace_policy: policy,
            ..SheetConfig::default()
        }
    }

    struct Harness {
        container: Container,
        config: SheetConfig,
        manager: Rc<RefCell<Option<SheetManager>>>,
        ambient_ok: Rc<Cell<bool>>,
        host: Host,
    }

    impl Harness {
        fn new(config: SheetConfig) -> Self {
            let mut h = Self {
                container: container(),
                config,
                manager: Rc::new(RefCell::new(None)),
                ambient_ok: Rc::new(Cell::new(false)),
                host: Host::new(Duration::from_millis(16)),
            };
            h.frame();
            h
        }

        fn frame(&mut self) {
            let (container, config) = (&self.container, &self.config);
            let (manager, ambient_ok) = (&self.manager, &self.ambient_ok);
            let mut build = || app(container, config, manager, ambient_ok);
            self.host.frame(&mut build);
        }

        async fn pump(&mut self, ms: u64) {
            let (container, config) = (&self.container, &self.config);
            let (manager, ambient_ok) = (&self.manager, &self.ambient_ok);
            let mut build = || app(container, config, manager, ambient_ok);
            self.host
                .pump(&mut build, Duration::from_millis(ms))
                .await;
        }

        fn manager(&self) -> SheetManager {
            self.manager.borrow().clone().unwrap()
        }

        /// Waits for queued sheet operations, then lets a few frames run.
        async fn settle(&mut self) {
            self.manager().idle().await;
            self.pump(50).await;
        }
    }

    fn app(
        container: &Container,
        config: &SheetConfig,
        out: &Rc<RefCell<Option<SheetManager>>>,
        ambient_ok: &Rc<Cell<bool>>,
    ) -> View {
        SheetProvider(container, config, |sheets| {
            *out.borrow_mut() = Some(sheets.clone());
            ambient_ok.set(local_sheet_manager().is_ok());
            Column(Modifier::new()).child(Text("body"))
        })
        .unwrap_or_else(|e| Text(e.to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_show_hide_ends_hidden_and_empty() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::Retain));
                let (a, b) = (
                    TestSheet::new(&h.container, "sheet_a"),
                    TestSheet::new(&h.container, "sheet_b"),
                );
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;
                assert!(m.is_visible());
                assert!(h.host.dump().contains("sheet sheet_a"));
                assert_eq!(m.sheet_state().current_value(), SheetValue::Expanded);

                m.show_rc(b.clone());
                m.hide();
                h.settle().await;

                assert!(!m.is_visible());
                assert!(m.active_screen().is_none());
                assert_eq!(m.sheet_state().current_value(), SheetValue::Hidden);
                assert!(!h.host.dump().contains("Scrim"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_show_replaces_first_and_retains_its_scope() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::Retain));
                let a = TestSheet::new(&h.container, "sheet_a");
                let b = TestSheet::new(&h.container, "sheet_b");
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;
                m.show_rc(b.clone());
                h.settle().await;

                assert!(m.is_visible());
                let active = m.active_screen().unwrap();
                assert_eq!(active.scope_name(), "sheet_b");
                let dump = h.host.dump();
                assert!(dump.contains("sheet sheet_b"));
                assert!(!dump.contains("sheet sheet_a"));

                assert_eq!(a.closes.get(), 0);
                assert!(h.container.is_open("sheet_a"));
                assert!(h.container.is_open("sheet_b"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_replaced_policy_closes_the_old_screen() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::CloseReplaced));
                let a = TestSheet::new(&h.container, "sheet_a");
                let b = TestSheet::new(&h.container, "sheet_b");
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;
                m.show_rc(b.clone());
                h.settle().await;

                assert_eq!(a.closes.get(), 1);
                assert!(!h.container.is_open("sheet_a"));
                assert_eq!(b.closes.get(), 0);

                m.hide();
                h.settle().await;
                assert_eq!(a.closes.get(), 1);
                assert_eq!(b.closes.get(), 1);
                assert_eq!(h.container.open_scopes(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_then_show_before_a_frame_closes_the_hidden_scope() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::Retain));
                let a = TestSheet::new(&h.container, "sheet_a");
                let b = TestSheet::new(&h.container, "sheet_b");
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;

                m.hide();
                m.show_rc(b.clone());
                h.settle().await;

                assert_eq!(a.closes.get(), 1);
                assert!(!h.container.is_open("sheet_a"));
                assert!(m.is_visible());
                assert_eq!(m.active_screen().unwrap().scope_name(), "sheet_b");
                assert!(h.host.dump().contains("sheet sheet_b"));

                m.hide();
                h.settle().await;
                assert_eq!(a.closes.get(), 1);
                assert_eq!(b.closes.get(), 1);
                assert_eq!(h.container.open_scopes(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_then_show_without_animation_closes_the_hidden_scope() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(SheetConfig {
                    animation_ms: 0,
                    ..SheetConfig::default()
                });
                let a = TestSheet::new(&h.container, "sheet_a");
                let b = TestSheet::new(&h.container, "sheet_b");
                let m = h.manager();

                m.show_rc(a.clone());
                h.pump(100).await;
                assert!(h.host.dump().contains("sheet sheet_a"));

                m.hide();
                m.show_rc(b.clone());
                h.pump(100).await;

                assert_eq!(a.closes.get(), 1);
                assert!(!h.container.is_open("sheet_a"));
                assert!(h.host.dump().contains("sheet sheet_b"));
                assert_eq!(b.closes.get(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nested_providers_keep_separate_sheets() {
        LocalSet::new()
            .run_until(async {
                let (outer_c, inner_c) = (container(), container());
                let config = fast(ReplacePolicy::Retain);
                let outer_m = Rc::new(RefCell::new(None::<SheetManager>));
                let inner_m = Rc::new(RefCell::new(None::<SheetManager>));
                let ambient_is_inner = Rc::new(Cell::new(false));

                let mut host = Host::new(Duration::from_millis(16));
                let mut build = || {
                    SheetProvider(&outer_c, &config, |outer| {
                        *outer_m.borrow_mut() = Some(outer.clone());
                        SheetProvider(&inner_c, &config, |inner| {
                            *inner_m.borrow_mut() = Some(inner.clone());
                            ambient_is_inner.set(local_sheet_manager().is_ok_and(|m| {
                                Rc::ptr_eq(m.host_model(), inner.host_model())
                            }));
                            Text("inner body")
                        })
                        .unwrap_or_else(|e| Text(e.to_string()))
                    })
                    .unwrap_or_else(|e| Text(e.to_string()))
                };
                host.frame(&mut build);

                let outer = outer_m.borrow().clone().unwrap();
                let inner = inner_m.borrow().clone().unwrap();
                assert!(!Rc::ptr_eq(outer.host_model(), inner.host_model()));
                assert!(ambient_is_inner.get());

                let a = TestSheet::new(&inner_c, "sheet_a");
                inner.show_rc(a.clone());
                inner.idle().await;
                host.pump(&mut build, Duration::from_millis(50)).await;

                assert!(inner.is_visible());
                assert!(!outer.is_visible());
                assert_eq!(host.dump().matches("Scrim").count(), 1);

                let b = TestSheet::new(&outer_c, "sheet_b");
                outer.show_rc(b.clone());
                outer.idle().await;
                host.pump(&mut build, Duration::from_millis(50)).await;
                let dump = host.dump();
                assert_eq!(dump.matches("Scrim").count(), 2);
                assert!(dump.contains("sheet sheet_a"));
                assert!(dump.contains("sheet sheet_b"));

                inner.hide();
                inner.idle().await;
                host.pump(&mut build, Duration::from_millis(50)).await;

                assert_eq!(a.closes.get(), 1);
                assert_eq!(inner_c.open_scopes(), 0);
                assert_eq!(b.closes.get(), 0);
                assert!(outer_c.is_open("sheet_b"));
                assert!(outer.is_visible());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_animation_timing_follows_the_current_config() {
        LocalSet::new()
            .run_until(async {
                let c = container();
                let out = Rc::new(RefCell::new(None::<SheetManager>));
                let ambient_ok = Rc::new(Cell::new(false));
                let mut recomposer = Recomposer::new();

                let quick = fast(ReplacePolicy::Retain);
                recomposer.compose(|| app(&c, &quick, &out, &ambient_ok));
                let m = out.borrow().clone().unwrap();
                assert_eq!(m.sheet_state().spec(), quick.animation_spec());

                let slow = SheetConfig {
                    animation_ms: 250,
                    ..quick.clone()
                };
                recomposer.compose(|| app(&c, &slow, &out, &ambient_ok));
                assert_eq!(
                    m.sheet_state().spec().duration,
                    Duration::from_millis(250)
                );

                m.show_rc(TestSheet::new(&c, "sheet_a"));
                tokio::time::sleep(Duration::from_millis(150)).await;
                let offset = m.sheet_state().offset();
                assert!(offset > 0.0 && offset < 1.0, "offset {offset}");

                m.idle().await;
                assert_eq!(m.sheet_state().current_value(), SheetValue::Expanded);
            })
            .await;
    }

    #[derive(Debug, Clone, Copy)]
    enum Dismiss {
        Hide,
        Back,
        OutsideTap,
        HideButton,
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_dismissal_closes_the_scope_once() {
        LocalSet::new()
            .run_until(async {
                for how in [
                    Dismiss::Hide,
                    Dismiss::Back,
                    Dismiss::OutsideTap,
                    Dismiss::HideButton,
                ] {
                    let mut h = Harness::new(fast(ReplacePolicy::Retain));
                    let a = TestSheet::new(&h.container, "sheet_a");
                    let m = h.manager();

                    m.show_rc(a.clone());
                    h.settle().await;
                    assert!(h.container.is_open("sheet_a"), "{how:?}");

                    let dispatched = match how {
                        Dismiss::Hide => {
                            m.hide();
                            true
                        }
                        Dismiss::Back => h.host.press_back(),
                        Dismiss::OutsideTap => h.host.tap_outside(),
                        Dismiss::HideButton => h.host.click("Hide Sheet"),
                    };
                    assert!(dispatched, "{how:?}");
                    h.settle().await;

                    assert!(!m.is_visible(), "{how:?}");
                    assert_eq!(a.closes.get(), 1, "{how:?}");
                    assert!(!h.container.is_open("sheet_a"), "{how:?}");

                    h.pump(200).await;
                    assert_eq!(a.closes.get(), 1, "{how:?}");
                    assert!(!h.host.press_back(), "{how:?}");
                }
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_dismissals_are_ignored() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(SheetConfig {
                    dismiss_on_back: false,
                    dismiss_on_outside_tap: false,
                    ..fast(ReplacePolicy::Retain)
                });
                let a = TestSheet::new(&h.container, "sheet_a");
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;

                assert!(!h.host.press_back());
                assert!(!h.host.tap_outside());
                h.settle().await;
                assert!(m.is_visible());
                assert_eq!(a.closes.get(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_during_show_animation_runs_after_it() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::Retain));
                let a = TestSheet::new(&h.container, "sheet_a");
                let m = h.manager();

                m.show_rc(a.clone());
                h.pump(40).await;
                let offset = m.sheet_state().offset();
                assert!(offset > 0.0 && offset < 1.0, "offset {offset}");
                assert!(m.is_visible());

                m.hide();
                h.settle().await;

                assert!(!m.is_visible());
                assert_eq!(m.sheet_state().current_value(), SheetValue::Hidden);
                assert_eq!(a.closes.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_is_unusable_after_dismissal() {
        LocalSet::new()
            .run_until(async {
                let mut h = Harness::new(fast(ReplacePolicy::Retain));
                let a = TestSheet::new(&h.container, "sheet_a");
                let m = h.manager();

                m.show_rc(a.clone());
                h.settle().await;
                assert!(a.scoped::<Marker>().is_ok());
                assert!(matches!(
                    a.scoped::<Tagged>(),
                    Err(SheetError::Inject(InjectError::MissingParameter {
                        index: 0,
                        ..
                    }))
                ));
                let tagged = a.scoped_with_params::<Tagged>(parameters_of!(7u32)).unwrap();
                assert_eq!(tagged.0, 7);
                let cached = a.scope.get_with_params::<Tagged>(parameters_of!(9u32)).unwrap();
                assert!(Rc::ptr_eq(&tagged, &cached));

                m.hide();
                h.settle().await;
                assert_eq!(
                    a.scoped::<Marker>().err(),
                    Some(SheetError::Inject(InjectError::ScopeClosed(
                        "sheet_a".into()
                    )))
                );
                assert_eq!(
                    a.scoped_with_params::<Tagged>(parameters_of!(7u32)).err(),
                    Some(SheetError::Inject(InjectError::ScopeClosed(
                        "sheet_a".into()
                    )))
                );
                // A second close is harmless.
                a.close_scope();
                assert_eq!(h.container.open_scopes(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ambient_manager_requires_a_provider() {
        assert_eq!(
            local_sheet_manager().err(),
            Some(SheetError::NotInitialized)
        );

        LocalSet::new()
            .run_until(async {
                let h = Harness::new(SheetConfig::default());
                assert!(h.ambient_ok.get());
            })
            .await;

        assert!(local_sheet_manager().is_err());
    }

    #[test]
    fn test_provider_without_host_model_fails() {
        let empty = Container::start(Vec::<Module>::new());
        let res = SheetProvider(&empty, &SheetConfig::default(), |_| Text("unreachable"));
        assert!(matches!(
            res,
            Err(SheetError::Inject(InjectError::NoDefinition { .. }))
        ));
    }

    #[test]
    fn test_config_fills_missing_fields_with_defaults() {
        let cfg: SheetConfig =
            serde_json::from_str(r#"{ "replace_policy": "close_replaced" }"#).unwrap();
        assert_eq!(cfg.replace_policy, ReplacePolicy::CloseReplaced);
        assert_eq!(cfg.animation_ms, 300);
        assert_eq!(cfg.properties(), SheetProperties::all());

        let cfg: SheetConfig = serde_json::from_str(r#"{ "dismiss_on_back": false }"#).unwrap();
        assert!(!cfg.properties().contains(SheetProperties::DISMISS_ON_BACK));
        assert!(
            cfg.properties()
                .contains(SheetProperties::SKIP_PARTIALLY_EXPANDED)
        );
        assert_eq!(cfg.replace_policy, ReplacePolicy::Retain);
    }
}
