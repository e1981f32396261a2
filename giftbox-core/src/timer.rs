use crate::controller::{LotteryController, Reveal};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub type SharedController<R> = Arc<Mutex<LotteryController<R>>>;

pub fn shared<R>(controller: LotteryController<R>) -> SharedController<R> {
    Arc::new(Mutex::new(controller))
}

/// The pending "show panel" step of a reveal
#[derive(Debug)]
pub struct RevealTimer {
    round: Uuid,
    handle: JoinHandle<bool>,
}

impl RevealTimer {
    /// Must run inside a tokio runtime. The controller has already marked the
    /// round revealed by the time a [`Reveal`] exists.
    pub fn schedule<R>(controller: SharedController<R>, reveal: &Reveal) -> Self
    where
        R: rand::Rng + Send + 'static,
    {
        let round = reveal.round;
        let delay = reveal.show_after;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.lock().show_panel(round)
        });

        tracing::debug!("Panel reveal for round {} scheduled in {:?}", round, delay);
        Self { round, handle }
    }

    pub fn round(&self) -> Uuid {
        self.round
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the panel was actually shown
    pub async fn wait(self) -> bool {
        match self.handle.await {
            Ok(shown) => shown,
            Err(e) if e.is_cancelled() => {
                tracing::debug!("Panel reveal for round {} cancelled", self.round);
                false
            }
            Err(e) => {
                tracing::warn!("Panel reveal for round {} failed: {}", self.round, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{BoxLayout, ConfettiConfig, ParticleEffect, Rect, Viewport};
    use crate::LotteryConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Row;

    impl BoxLayout for Row {
        fn box_rect(&self, index: usize) -> Rect {
            Rect::new(index as f64 * 10.0, 0.0, 10.0, 10.0)
        }

        fn viewport(&self) -> Viewport {
            Viewport {
                width: 60.0,
                height: 10.0,
            }
        }
    }

    struct Silent;

    impl ParticleEffect for Silent {
        fn fire(&self, _config: &ConfettiConfig) {}
    }

    fn shared_lottery(delay_ms: u64) -> SharedController<StdRng> {
        let mut config = LotteryConfig::default();
        config.reveal_delay_ms = delay_ms;
        shared(LotteryController::for_pool(config, StdRng::seed_from_u64(42)).unwrap())
    }

    #[tokio::test]
    async fn test_panel_shown_after_delay() {
        let lottery = shared_lottery(20);
        let reveal = lottery.lock().activate(0, &Row, &Silent).unwrap().unwrap();

        let timer = RevealTimer::schedule(lottery.clone(), &reveal);
        assert_eq!(timer.round(), reveal.round);
        assert!(!lottery.lock().panel().visible);

        assert!(timer.wait().await);
        let guard = lottery.lock();
        assert!(guard.panel().visible);
        assert!(guard.reset_visible());
    }

    #[tokio::test]
    async fn test_cancelled_reveal_keeps_panel_hidden() {
        let lottery = shared_lottery(500);
        let reveal = lottery.lock().activate(3, &Row, &Silent).unwrap().unwrap();

        let timer = RevealTimer::schedule(lottery.clone(), &reveal);
        timer.cancel();

        assert!(!timer.wait().await);
        assert!(!lottery.lock().panel().visible);
        assert!(lottery.lock().is_revealed());
    }

    #[tokio::test]
    async fn test_reset_before_timer_fires() {
        let lottery = shared_lottery(30);
        let reveal = lottery.lock().activate(5, &Row, &Silent).unwrap().unwrap();

        let timer = RevealTimer::schedule(lottery.clone(), &reveal);
        lottery.lock().reset();

        assert!(!timer.wait().await);
        assert!(!lottery.lock().panel().visible);
        assert!(!lottery.lock().is_revealed());
    }
}
