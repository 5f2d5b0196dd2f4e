use std::cell::RefCell;
use std::rc::Rc;

use sheet_core::*;
use sheet_inject::{Container, Module};
use sheet_ui::{ModalBottomSheet, SheetState, Stack, ViewExt};

use crate::screen::same_screen;
use crate::{BottomSheet, ReplacePolicy, SheetConfig, SheetError, SheetHostModel, SheetManager};

/// Ambient handle to the manager of the innermost [`SheetProvider`].
#[derive(Clone)]
pub struct LocalSheet(pub SheetManager);

/// The manager of the innermost composing [`SheetProvider`].
///
/// Only meaningful while a provider is building its subtree. Callbacks that
/// run later should capture the manager during composition.
pub fn local_sheet_manager() -> Result<SheetManager, SheetError> {
    local::<LocalSheet>()
        .map(|l| l.0)
        .ok_or(SheetError::NotInitialized)
}

/// Definitions the provider needs: the shared [`SheetHostModel`].
pub fn sheet_module() -> Module {
    Module::new().single(|_| Ok(SheetHostModel::new()))
}

/// Hosts the local bottom sheet for everything `content` builds.
///
/// `content` gets the manager directly; descendants can also reach it
/// through [`local_sheet_manager`]. While the sheet is visible the active
/// screen is drawn in a modal sheet on top of `content`. Dismissal by back
/// press or outside tap goes through [`SheetManager::hide`].
///
/// The provider's state is keyed by the container's [`SheetHostModel`], so
/// providers over different containers nest independently. Providers over
/// the same container share one sheet; compose only one of them at a time.
/// `config` is read on every composed frame, including its animation timing.
///
/// Must be composed inside a `tokio::task::LocalSet`.
pub fn SheetProvider(
    container: &Container,
    config: &SheetConfig,
    content: impl FnOnce(&SheetManager) -> View,
) -> Result<View, SheetError> {
    let model = container.get::<SheetHostModel>()?;
    let group = format!("local_sheet@{:p}", Rc::as_ptr(&model));

    Ok(key_group(group, || {
        let manager = remember_with_key("manager", || {
            log::debug!("sheet provider mounted");
            SheetManager::new(
                model,
                SheetState::new(true, config.animation_spec()),
                UiTaskQueue::spawn(),
            )
        });
        let manager = (*manager).clone();
        manager.sheet_state().set_spec(config.animation_spec());

        provide_local(LocalSheet(manager.clone()), || {
            let body = content(&manager);

            let visible = manager.is_visible();
            let sheet = match manager.active_screen() {
                Some(screen) if visible => {
                    let on_dismiss: Rc<dyn Fn()> = {
                        let m = manager.clone();
                        Rc::new(move || m.hide())
                    };
                    Some(ModalBottomSheet(
                        manager.sheet_state(),
                        config.properties(),
                        on_dismiss,
                        MountedSheet(screen, &manager, config.replace_policy),
                    ))
                }
                _ => None,
            };

            Stack(Modifier::new().fill_max_size()).child((body, sheet))
        })
    }))
}

/// Sheet content plus the hook that closes the mounted screen's scope once
/// the content leaves composition.
///
/// The slot is keyed by the dismissal generation. A `hide` bumps it, so the
/// next frame mounts a fresh slot and forgets the old one even when a `show`
/// followed before any frame saw the sheet hidden.
fn MountedSheet(
    screen: Rc<dyn BottomSheet>,
    manager: &SheetManager,
    policy: ReplacePolicy,
) -> View {
    let generation = manager.host_model().generation();
    key_group(format!("content/{generation}"), || {
        let mounted = remember_with_key_disposable(
            "mounted",
            || RefCell::new(None::<Rc<dyn BottomSheet>>),
            |mounted| {
                if let Some(screen) = mounted.borrow_mut().take() {
                    log::debug!("sheet `{}` dismissed; closing scope", screen.scope_name());
                    screen.close_scope();
                }
            },
        );

        let replaced = mounted.borrow_mut().replace(screen.clone());
        if let Some(old) = replaced
            && !same_screen(&old, &screen)
        {
            match policy {
                ReplacePolicy::Retain => log::warn!(
                    "sheet `{}` replaced by `{}` without hide; its scope stays open",
                    old.scope_name(),
                    screen.scope_name()
                ),
                ReplacePolicy::CloseReplaced => {
                    log::debug!("sheet `{}` replaced; closing scope", old.scope_name());
                    old.close_scope();
                }
            }
        }

        screen.content(manager)
    })
}
