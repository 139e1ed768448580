use crate::api::UploadResult;
use crate::upload::{SessionEvent, SessionSnapshot, UploadSessionHandle, UploadSessionService};
use crate::AppContext;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Start an upload session for the calling component.
///
/// The session lives as long as the component: unmounting drops the handle,
/// which ends the session. Remount the component to get a fresh session.
/// `on_completed` fires once when the upload succeeds.
pub fn use_upload_session(
    on_completed: EventHandler<UploadResult>,
) -> (UploadSessionHandle, Signal<SessionSnapshot>) {
    let context = use_context::<AppContext>();

    let (handle, events) = use_hook(move || {
        let (handle, events) =
            UploadSessionService::start(context.api.clone(), context.runtime_handle.clone());
        (handle, Rc::new(RefCell::new(Some(events))))
    });

    let mut snapshot = use_signal(|| handle.snapshot());

    use_hook({
        let handle = handle.clone();
        move || {
            let mut snapshot_rx = handle.subscribe();
            spawn(async move {
                while snapshot_rx.changed().await.is_ok() {
                    let next = snapshot_rx.borrow_and_update().clone();
                    snapshot.set(next);
                }
            });

            if let Some(mut events) = events.borrow_mut().take() {
                spawn(async move {
                    while let Some(event) = events.recv().await {
                        debug!("Upload session event: {:?}", event);
                        if let SessionEvent::Completed(result) = event {
                            on_completed.call(result);
                        }
                    }
                });
            }
        }
    });

    (handle, snapshot)
}
