#[cfg(test)]
mod tests {
    use std::time::Duration;

    use local_sheet::{SheetConfig, sheet_module};
    use sheet_inject::{Container, InjectError, named};
    use sheet_ui::Host;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    use crate::*;

    const TICK: Duration = Duration::from_millis(1000);

    fn container() -> Container {
        Container::start([sheet_module(), app_module(&DemoConfig::default())])
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_ticks_once_per_interval_until_its_scope_closes() {
        LocalSet::new()
            .run_until(async {
                let c = container();
                let scope = c
                    .get_or_create_scope(COUNTER_SCOPE, named(COUNTER_SCOPE))
                    .unwrap();
                let count = scope.get::<CounterViewModel>().unwrap().count_signal();

                sleep(TICK / 2).await;
                assert_eq!(count.get(), 0);
                sleep(TICK * 3).await;
                assert_eq!(count.get(), 3);

                assert!(scope.close());
                sleep(TICK * 5).await;
                assert_eq!(count.get(), 3);
            })
            .await;
    }

    #[test]
    fn test_counter_only_resolves_inside_its_scope() {
        let c = container();
        assert!(matches!(
            c.get::<CounterViewModel>(),
            Err(InjectError::NoDefinition { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarting_cancels_the_running_ticker() {
        LocalSet::new()
            .run_until(async {
                let vm = CounterViewModel::new(TICK);
                sleep(TICK / 2).await;
                vm.start_auto_increment();

                sleep(TICK * 9 / 10).await;
                assert_eq!(vm.count(), 0);
                sleep(TICK / 5).await;
                assert_eq!(vm.count(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_through_the_ui() {
        LocalSet::new()
            .run_until(async {
                let c = container();
                let config = DemoConfig::default();
                let mut host = Host::new(config.frame_interval());
                let mut build = || App(&c, &config);

                host.frame(&mut build);
                insta::assert_snapshot!(host.dump().trim_end(), @r#"
                Stack
                  Surface
                    Box
                      Column
                        Button "Show Counter Bottom Sheet"
                "#);

                assert!(host.click("Show Counter Bottom Sheet"));
                host.pump(&mut build, TICK * 2 + TICK / 2).await;
                insta::assert_snapshot!(host.dump().trim_end(), @r#"
                Stack
                  Surface
                    Box
                      Column
                        Button "Show Counter Bottom Sheet"
                  Stack
                    Scrim (dismissible)
                    Surface offset=0.00
                      Column
                        Box
                        Column
                          Text "2" (48sp)
                          Button "Hide Sheet"
                "#);
                assert!(c.is_open(COUNTER_SCOPE));

                assert!(host.press_back());
                host.pump(&mut build, Duration::from_millis(100)).await;
                assert!(!host.dump().contains("Hide Sheet"));
                assert_eq!(c.open_scopes(), 0);

                // A fresh scope means a fresh counter.
                assert!(host.click("Show Counter Bottom Sheet"));
                host.pump(&mut build, TICK + TICK / 2).await;
                assert!(host.dump().contains(r#"Text "1" (48sp)"#));

                assert!(host.click("Hide Sheet"));
                host.pump(&mut build, Duration::from_millis(100)).await;
                assert_eq!(c.open_scopes(), 0);
            })
            .await;
    }

    #[test]
    fn test_config_from_json() {
        let cfg: DemoConfig = serde_json::from_str(
            r#"{ "counter_interval_ms": 250, "sheet": { "animation_ms": 0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.counter_interval(), Duration::from_millis(250));
        assert_eq!(cfg.frame_interval_ms, 16);
        assert_eq!(
            cfg.sheet,
            SheetConfig {
                animation_ms: 0,
                ..SheetConfig::default()
            }
        );
    }
}
