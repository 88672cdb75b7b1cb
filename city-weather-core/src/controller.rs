//! Turns user actions into provider calls and applies the outcome to the
//! weather screen state.
//!
//! Overlapping calls are neither de-duplicated nor cancelled. By default the
//! last response to land wins; [`ControllerOptions::discard_stale_responses`]
//! switches to "newest request wins" using a per-request sequence number.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    provider::WeatherProvider,
    view::{Phase, ViewState},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub discard_stale_responses: bool,
}

#[derive(Debug)]
struct Inner {
    view: ViewState,
    /// Sequence number handed to the most recently started request.
    last_issued: u64,
    /// Sequence number of the request whose snapshot is shown.
    last_applied: u64,
    attached: bool,
}

#[derive(Debug)]
pub struct WeatherController {
    provider: Arc<dyn WeatherProvider>,
    options: ControllerOptions,
    inner: Mutex<Inner>,
}

impl WeatherController {
    pub fn new(provider: Arc<dyn WeatherProvider>, options: ControllerOptions) -> Self {
        Self {
            provider,
            options,
            inner: Mutex::new(Inner {
                view: ViewState::default(),
                last_issued: 0,
                last_applied: 0,
                attached: true,
            }),
        }
    }

    // Never held across an await.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_city(&self, city: impl Into<String>) {
        self.lock().view.city = city.into();
    }

    pub fn city(&self) -> String {
        self.lock().view.city.clone()
    }

    /// Copy of the current screen state.
    pub fn state(&self) -> ViewState {
        self.lock().view.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().view.phase()
    }

    /// Fetch weather for the held city. Never fails: errors are logged and
    /// recorded in [`ViewState::last_error`].
    pub async fn submit(&self) {
        let (seq, city) = {
            let mut inner = self.lock();
            inner.view.begin_fetch();
            inner.last_issued += 1;
            (inner.last_issued, inner.view.city.clone())
        };

        let result = self.provider.current_weather(&city).await;

        let mut inner = self.lock();
        if !inner.attached {
            log::debug!("screen closed, dropping response #{seq} for {city:?}");
            return;
        }

        match result {
            Ok(_) if self.options.discard_stale_responses && seq < inner.last_applied => {
                log::debug!(
                    "dropping stale response #{seq} for {city:?}, #{} already shown",
                    inner.last_applied
                );
                inner.view.finish_discarded();
            }
            Ok(snapshot) => {
                log::debug!("response #{seq}: weather for {:?}", snapshot.name);
                inner.last_applied = seq;
                inner.view.apply_success(snapshot, Utc::now());
            }
            Err(err) => {
                log::error!("failed to fetch weather for {city:?}: {err}");
                inner.view.apply_failure(&err);
            }
        }
    }

    /// Pull-to-refresh: the same fetch as [`submit`](Self::submit), tracked
    /// by its own flag.
    pub async fn refresh(&self) {
        self.lock().view.begin_refresh();
        self.submit().await;
        self.lock().view.end_refresh();
    }

    /// Mark the screen as closed. Responses landing afterwards are dropped.
    pub fn detach(&self) {
        self.lock().attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        icon::Icon,
        provider::FetchError,
        testing::{FakeProvider, snapshot},
    };
    use reqwest::StatusCode;

    fn controller(fake: &Arc<FakeProvider>, options: ControllerOptions) -> Arc<WeatherController> {
        Arc::new(WeatherController::new(fake.clone(), options))
    }

    async fn wait_for_calls(fake: &FakeProvider, n: usize) {
        while fake.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    fn not_found() -> FetchError {
        FetchError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"cod":"404","message":"city not found"}"#.into(),
        }
    }

    #[tokio::test]
    async fn submit_applies_snapshot() {
        let fake = Arc::new(FakeProvider::default());
        fake.respond(Ok(snapshot("Paris", "Clear", 18.0)));

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.set_city("Paris");
        ctl.submit().await;

        let state = ctl.state();
        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.is_loading);
        assert_eq!(state.icon, Some(Icon::Clear));

        let card = state.card().expect("card");
        assert_eq!(card.title, "Paris");
        assert_eq!(card.temperature(), "18°C");
        assert_eq!(fake.cities(), vec!["Paris".to_string()]);
    }

    #[tokio::test]
    async fn busy_flag_is_set_while_in_flight() {
        let fake = Arc::new(FakeProvider::default());
        let tx = fake.script();

        let ctl = controller(&fake, ControllerOptions::default());
        let c = ctl.clone();
        let task = tokio::spawn(async move { c.submit().await });

        wait_for_calls(&fake, 1).await;
        assert!(ctl.state().is_loading);
        assert_eq!(ctl.phase(), Phase::Loading);

        tx.send(Ok(snapshot("Paris", "Clouds", 14.0)))
            .expect("receiver alive");
        task.await.expect("task completes");

        assert_eq!(ctl.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn failure_keeps_previous_snapshot() {
        let fake = Arc::new(FakeProvider::default());
        fake.respond(Ok(snapshot("Paris", "Clear", 18.0)));
        fake.respond(Err(not_found()));

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.set_city("Paris");
        ctl.submit().await;
        let before = ctl.state().snapshot;

        ctl.set_city("Atlantis");
        ctl.submit().await;

        let state = ctl.state();
        assert_eq!(state.snapshot, before);
        assert!(!state.is_loading);
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.last_error.expect("error recorded").contains("404"));
    }

    #[tokio::test]
    async fn failure_before_any_snapshot_stays_idle() {
        let fake = Arc::new(FakeProvider::default());
        fake.respond(Err(not_found()));

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.submit().await;

        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.state().snapshot.is_none());
    }

    #[tokio::test]
    async fn empty_city_is_still_requested() {
        let fake = Arc::new(FakeProvider::default());
        fake.respond(Err(not_found()));

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.submit().await;

        assert_eq!(fake.cities(), vec![String::new()]);
    }

    #[tokio::test]
    async fn refresh_uses_held_city_and_clears_its_flag() {
        let fake = Arc::new(FakeProvider::default());
        let tx = fake.script();

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.set_city("Oslo");
        let c = ctl.clone();
        let task = tokio::spawn(async move { c.refresh().await });

        wait_for_calls(&fake, 1).await;
        let mid = ctl.state();
        assert!(mid.refreshing);
        assert!(mid.is_loading);

        tx.send(Ok(snapshot("Oslo", "Snow", -3.0)))
            .expect("receiver alive");
        task.await.expect("task completes");

        let state = ctl.state();
        assert!(!state.refreshing);
        assert!(!state.is_loading);
        assert_eq!(state.icon, Some(Icon::Snow));
        assert_eq!(fake.cities(), vec!["Oslo".to_string()]);
    }

    #[tokio::test]
    async fn last_response_to_land_wins() {
        let fake = Arc::new(FakeProvider::default());
        let submit_tx = fake.script();
        let refresh_tx = fake.script();

        let ctl = controller(&fake, ControllerOptions::default());
        ctl.set_city("Paris");

        let c = ctl.clone();
        let submit = tokio::spawn(async move { c.submit().await });
        wait_for_calls(&fake, 1).await;

        let c = ctl.clone();
        let refresh = tokio::spawn(async move { c.refresh().await });
        wait_for_calls(&fake, 2).await;

        refresh_tx
            .send(Ok(snapshot("Paris", "Rain", 10.0)))
            .expect("receiver alive");
        refresh.await.expect("refresh completes");
        assert_eq!(ctl.state().icon, Some(Icon::Rain));

        submit_tx
            .send(Ok(snapshot("Paris", "Clear", 18.0)))
            .expect("receiver alive");
        submit.await.expect("submit completes");

        let state = ctl.state();
        assert_eq!(state.icon, Some(Icon::Clear));
        assert_eq!(state.card().expect("card").temp, 18.0);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn stale_response_is_dropped_when_enabled() {
        let fake = Arc::new(FakeProvider::default());
        let submit_tx = fake.script();
        let refresh_tx = fake.script();

        let ctl = controller(
            &fake,
            ControllerOptions {
                discard_stale_responses: true,
            },
        );
        ctl.set_city("Paris");

        let c = ctl.clone();
        let submit = tokio::spawn(async move { c.submit().await });
        wait_for_calls(&fake, 1).await;

        let c = ctl.clone();
        let refresh = tokio::spawn(async move { c.refresh().await });
        wait_for_calls(&fake, 2).await;

        refresh_tx
            .send(Ok(snapshot("Paris", "Rain", 10.0)))
            .expect("receiver alive");
        refresh.await.expect("refresh completes");

        submit_tx
            .send(Ok(snapshot("Paris", "Clear", 18.0)))
            .expect("receiver alive");
        submit.await.expect("submit completes");

        let state = ctl.state();
        assert_eq!(state.icon, Some(Icon::Rain));
        assert_eq!(state.card().expect("card").temp, 10.0);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn responses_after_detach_are_ignored() {
        let fake = Arc::new(FakeProvider::default());
        let tx = fake.script();

        let ctl = controller(&fake, ControllerOptions::default());
        let c = ctl.clone();
        let task = tokio::spawn(async move { c.submit().await });
        wait_for_calls(&fake, 1).await;

        ctl.detach();
        tx.send(Ok(snapshot("Paris", "Clear", 18.0)))
            .expect("receiver alive");
        task.await.expect("task completes");

        assert!(ctl.state().snapshot.is_none());
    }
}
