use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread,
    time::{Duration, Instant},
};

use dialog_host::{
    DialogHostServices, DialogHostStrategy, DialogOutcome, DialogPrompt, DialogRenderer,
    RenderFuture, ScriptedDialogRenderer, ScriptedResponse,
};
use dialog_runtime::{
    DialogAction, DialogConfig, DialogCoordinator, DialogError, DialogRequest, DialogResolution,
    UiThreadDispatcher,
};
use futures::{executor::block_on, future};
use pretty_assertions::assert_eq;

fn coordinator(renderer: &ScriptedDialogRenderer) -> DialogCoordinator {
    DialogCoordinator::with_ui_thread(Arc::new(renderer.clone()), DialogConfig::default())
        .expect("spawn ui thread")
}

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let hit = Arc::clone(&count);
    (count, move || {
        hit.fetch_add(1, Ordering::SeqCst);
    })
}

/// Renderer that panics while building its first dialog, before any future exists.
#[derive(Default)]
struct FailsToBuildOnce {
    calls: AtomicUsize,
}

impl DialogRenderer for FailsToBuildOnce {
    fn show<'a>(&'a self, _prompt: &'a DialogPrompt) -> RenderFuture<'a, DialogOutcome> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("no native window");
        }
        Box::pin(async { DialogOutcome::Canceled })
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn concurrent_requests_are_shown_one_at_a_time() {
    // The delay yields, so only the coordinator keeps two shows from overlapping on the UI thread.
    let renderer =
        ScriptedDialogRenderer::default().with_yielding_delay(Duration::from_millis(15));
    let coordinator = coordinator(&renderer);

    let callers: Vec<_> = (0..8)
        .map(|n| {
            let coordinator = coordinator.clone();
            let request = DialogRequest::new(format!("#{n}"));
            thread::spawn(move || block_on(coordinator.present(request)))
        })
        .collect();
    for caller in callers {
        assert_eq!(caller.join().expect("caller thread"), Ok(true));
    }

    let mut shown = renderer.shown();
    assert_eq!(shown.len(), 8);
    assert_eq!(renderer.max_in_flight(), 1);
    shown.sort_by_key(|dialog| dialog.started_at);
    for pair in shown.windows(2) {
        assert!(pair[0].finished_at <= pair[1].started_at);
    }
}

#[test]
fn two_slow_dialogs_take_at_least_their_combined_time() {
    let renderer =
        ScriptedDialogRenderer::default().with_yielding_delay(Duration::from_millis(50));
    let coordinator = coordinator(&renderer);
    let started = Instant::now();

    let other = {
        let coordinator = coordinator.clone();
        thread::spawn(move || block_on(coordinator.present(DialogRequest::new("first"))))
    };
    let mine = block_on(coordinator.present(DialogRequest::new("second")));
    let theirs = other.join().expect("caller thread");
    let elapsed = started.elapsed();

    assert_eq!(mine, Ok(true));
    assert_eq!(theirs, Ok(true));
    assert!(elapsed >= Duration::from_millis(100));
    assert_eq!(renderer.max_in_flight(), 1);
}

#[test]
fn dismissal_runs_the_cancel_callback_once() {
    let renderer = ScriptedDialogRenderer::with_script([ScriptedResponse::Cancel]);
    let coordinator = coordinator(&renderer);
    let (canceled, on_cancel) = counter();
    let (chosen, on_ok) = counter();

    let shown = block_on(coordinator.present(DialogRequest::with_cancel(
        "Discard draft?",
        on_cancel,
        [DialogAction::affirmative("OK", on_ok)],
    )));

    assert_eq!(shown, Ok(true));
    assert_eq!(canceled.load(Ordering::SeqCst), 1);
    assert_eq!(chosen.load(Ordering::SeqCst), 0);
}

#[test]
fn choosing_an_action_runs_only_that_action() {
    let renderer =
        ScriptedDialogRenderer::with_script([ScriptedResponse::ChooseLabel("Retry".to_string())]);
    let coordinator = coordinator(&renderer);
    let (canceled, on_cancel) = counter();
    let (retried, on_retry) = counter();
    let (ignored, on_ignore) = counter();

    let resolution = block_on(coordinator.present_detailed(DialogRequest::with_cancel(
        "Upload failed",
        on_cancel,
        [
            DialogAction::affirmative("Retry", on_retry),
            DialogAction::negative("Ignore", on_ignore),
        ],
    )));

    assert_eq!(
        resolution,
        Ok(DialogResolution::Action {
            index: 0,
            label: "Retry".to_string()
        })
    );
    assert_eq!(retried.load(Ordering::SeqCst), 1);
    assert_eq!(ignored.load(Ordering::SeqCst), 0);
    assert_eq!(canceled.load(Ordering::SeqCst), 0);
}

#[test]
fn renderer_failures_resolve_false_and_free_the_gate() {
    let renderer = ScriptedDialogRenderer::with_script([
        ScriptedResponse::Fail("no window".to_string()),
        ScriptedResponse::Panic("native crash".to_string()),
        ScriptedResponse::Cancel,
    ]);
    let coordinator = coordinator(&renderer);

    assert_eq!(
        block_on(coordinator.present_detailed(DialogRequest::new("a"))),
        Err(DialogError::RenderFailure("no window".to_string()))
    );
    assert_eq!(
        block_on(coordinator.present_detailed(DialogRequest::new("b"))),
        Err(DialogError::RenderFailure(
            "renderer panicked: native crash".to_string()
        ))
    );
    assert_eq!(block_on(coordinator.present(DialogRequest::new("c"))), Ok(true));
    assert_eq!(renderer.show_count(), 3);
    assert!(!coordinator.is_presenting());
}

#[test]
fn out_of_range_choice_is_a_render_failure() {
    let renderer = ScriptedDialogRenderer::with_script([ScriptedResponse::Choose(4)]);
    let coordinator = coordinator(&renderer);
    let (canceled, on_cancel) = counter();

    let shown = block_on(coordinator.present(DialogRequest::with_cancel("x", on_cancel, [])));

    assert_eq!(shown, Ok(false));
    assert_eq!(canceled.load(Ordering::SeqCst), 0);
}

#[test]
fn dialogs_render_on_the_ui_thread() {
    let renderer = ScriptedDialogRenderer::default();
    let dispatcher = Arc::new(UiThreadDispatcher::spawn("dialog-ui-test").expect("spawn"));
    let ui_thread = dispatcher.ui_thread_id();
    let renderer_handle: Arc<dyn DialogRenderer> = Arc::new(renderer.clone());
    let coordinator = DialogCoordinator::new(
        DialogHostServices::native(dispatcher, renderer_handle),
        DialogConfig::default(),
    );

    let from_worker = {
        let coordinator = coordinator.clone();
        thread::spawn(move || block_on(coordinator.present(DialogRequest::new("worker"))))
    };
    assert_eq!(from_worker.join().expect("worker"), Ok(true));
    assert_eq!(block_on(coordinator.present(DialogRequest::new("main"))), Ok(true));

    let threads: Vec<_> = renderer.shown().iter().map(|dialog| dialog.thread).collect();
    assert_eq!(threads, vec![ui_thread, ui_thread]);
}

#[test]
fn blank_titles_use_the_configured_default() {
    let renderer = ScriptedDialogRenderer::default();
    let coordinator = DialogCoordinator::with_ui_thread(
        Arc::new(renderer.clone()),
        DialogConfig::default().with_default_title("Heads up"),
    )
    .expect("spawn ui thread");

    for request in [
        DialogRequest::new("untitled"),
        DialogRequest::new("blank").titled("  "),
        DialogRequest::new("titled").titled("Sync"),
    ] {
        assert_eq!(block_on(coordinator.present(request)), Ok(true));
    }

    let titles: Vec<_> = renderer
        .shown()
        .into_iter()
        .map(|dialog| dialog.prompt.title)
        .collect();
    assert_eq!(titles, vec!["Heads up", "Heads up", "Sync"]);
}

#[test]
fn unsupported_platform_is_reported_as_an_error() {
    let coordinator = DialogCoordinator::new(
        DialogHostServices {
            dispatcher: None,
            renderer: None,
            strategy: DialogHostStrategy::DesktopStub,
        },
        DialogConfig::default(),
    );
    let (canceled, on_cancel) = counter();

    let started = Instant::now();
    let result = block_on(coordinator.present(DialogRequest::with_cancel("x", on_cancel, [])));

    assert_eq!(result, Err(DialogError::UnsupportedPlatform));
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(canceled.load(Ordering::SeqCst), 0);
    assert_eq!(coordinator.strategy(), DialogHostStrategy::DesktopStub);
}

#[test]
fn missing_dispatcher_resolves_false() {
    let renderer = ScriptedDialogRenderer::default();
    let coordinator = DialogCoordinator::new(
        DialogHostServices {
            dispatcher: None,
            renderer: Some(Arc::new(renderer.clone())),
            strategy: DialogHostStrategy::Native,
        },
        DialogConfig::default(),
    );

    assert_eq!(block_on(coordinator.present(DialogRequest::new("x"))), Ok(false));
    assert_eq!(renderer.show_count(), 0);
}

#[test]
fn abort_while_queued_abandons_without_callbacks() {
    let renderer = ScriptedDialogRenderer::default().with_delay(Duration::from_millis(200));
    let coordinator = coordinator(&renderer);

    let holder = {
        let coordinator = coordinator.clone();
        thread::spawn(move || block_on(coordinator.present(DialogRequest::new("holder"))))
    };
    wait_until(|| coordinator.is_presenting());

    let (canceled, on_cancel) = counter();
    let aborted = block_on(coordinator.present_until(
        DialogRequest::with_cancel("queued", on_cancel, []),
        future::ready(()),
    ));

    assert_eq!(aborted, Err(DialogError::Abandoned));
    assert_eq!(canceled.load(Ordering::SeqCst), 0);
    assert_eq!(holder.join().expect("holder"), Ok(true));
    assert_eq!(renderer.show_count(), 1);
    assert_eq!(coordinator.queued_requests(), 0);
}

#[test]
fn closing_fails_queued_requests_but_lets_the_current_dialog_finish() {
    let renderer = ScriptedDialogRenderer::default().with_delay(Duration::from_millis(150));
    let coordinator = coordinator(&renderer);

    let holder = {
        let coordinator = coordinator.clone();
        thread::spawn(move || block_on(coordinator.present_detailed(DialogRequest::new("holder"))))
    };
    wait_until(|| coordinator.is_presenting());
    let queued = {
        let coordinator = coordinator.clone();
        thread::spawn(move || block_on(coordinator.present_detailed(DialogRequest::new("queued"))))
    };
    wait_until(|| coordinator.queued_requests() == 1);

    coordinator.close();

    assert_eq!(queued.join().expect("queued"), Err(DialogError::Closed));
    assert_eq!(
        holder.join().expect("holder"),
        Ok(DialogResolution::Canceled)
    );
    assert_eq!(
        block_on(coordinator.present(DialogRequest::new("late"))),
        Ok(false)
    );
    assert_eq!(renderer.show_count(), 1);
}

#[test]
fn fire_and_forget_presents_in_the_background() {
    let renderer = ScriptedDialogRenderer::with_script([ScriptedResponse::Cancel]);
    let coordinator = coordinator(&renderer);
    let (tx, rx) = mpsc::channel();

    coordinator.show(DialogRequest::with_cancel(
        "Saved",
        move || tx.send("dismissed").expect("report"),
        [],
    ));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("dismissed"));
    assert_eq!(renderer.show_count(), 1);
}

#[test]
fn panicking_callback_interrupts_its_caller_and_frees_the_gate() {
    let renderer = ScriptedDialogRenderer::with_script([ScriptedResponse::Choose(0)]);
    let coordinator = coordinator(&renderer);

    let result = block_on(coordinator.present_detailed(DialogRequest::with_actions(
        "boom",
        [DialogAction::affirmative("OK", || panic!("callback failed"))],
    )));

    assert_eq!(result, Err(DialogError::Interrupted));
    wait_until(|| !coordinator.is_presenting());
    assert_eq!(coordinator.queued_requests(), 0);

    assert_eq!(
        block_on(coordinator.present(DialogRequest::new("after"))),
        Ok(true)
    );
    assert_eq!(renderer.show_count(), 2);
}

#[test]
fn renderer_panicking_before_showing_is_a_render_failure() {
    let coordinator = DialogCoordinator::with_ui_thread(
        Arc::new(FailsToBuildOnce::default()),
        DialogConfig::default(),
    )
    .expect("spawn ui thread");

    assert_eq!(
        block_on(coordinator.present_detailed(DialogRequest::new("first"))),
        Err(DialogError::RenderFailure(
            "renderer panicked: no native window".to_string()
        ))
    );
    assert!(!coordinator.is_presenting());
    assert_eq!(
        block_on(coordinator.present(DialogRequest::new("second"))),
        Ok(true)
    );
}
