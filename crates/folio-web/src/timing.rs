//! Frame clock for the animation loop. Free of browser bindings.

/// Frames further apart than this count as a resumed background tab.
pub const MAX_FRAME_GAP_MS: f64 = 100.0;

/// Animation step in seconds for a frame at `now_ms`, given the previous
/// frame time.
///
/// The first frame, a gap above [`MAX_FRAME_GAP_MS`] and a clock that went
/// backwards all yield 0: the scene does not jump, but the frame is still
/// presented.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> f32 {
    match last_ms {
        Some(last) if now_ms >= last && now_ms - last <= MAX_FRAME_GAP_MS => {
            ((now_ms - last) / 1000.0) as f32
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{EnvironmentSignals, StaticSignals};
    use folio_scene::{ComposerPhase, SceneComposer, Scheduler, Task, TaskHandle, When};

    #[test]
    fn test_first_frame_has_no_step() {
        assert_eq!(frame_delta(None, 1234.0), 0.0);
    }

    #[test]
    fn test_regular_frames_step_by_gap() {
        assert!((frame_delta(Some(1000.0), 1016.0) - 0.016).abs() < 1e-6);
        assert!((frame_delta(Some(0.0), 100.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_and_backwards_clock_freeze_step() {
        assert_eq!(frame_delta(Some(1000.0), 1120.0), 0.0);
        assert_eq!(frame_delta(Some(1000.0), 900.0), 0.0);
    }

    struct Queue(Vec<(Task, TaskHandle)>);

    impl Scheduler for Queue {
        fn schedule(&mut self, task: Task, _when: When) -> TaskHandle {
            let handle = TaskHandle(self.0.len() as u32 + 1);
            self.0.push((task, handle));
            handle
        }

        fn cancel(&mut self, handle: TaskHandle) {
            self.0.retain(|(_, h)| *h != handle);
        }
    }

    #[test]
    fn test_fade_completes_at_slow_frame_rate() {
        let signals = StaticSignals(EnvironmentSignals {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
            logical_cores: Some(8),
            device_memory_gb: Some(8.0),
            ..EnvironmentSignals::default()
        });
        let mut composer = SceneComposer::new(Box::new(signals), 9);
        let mut queue = Queue(Vec::new());
        composer.mount(&mut queue);
        while let Some((task, _)) = queue.0.pop() {
            composer.run_task(task, 0.0, &mut queue);
        }
        assert_eq!(composer.phase(), ComposerPhase::ReadyVisible);

        // 8 fps: every gap exceeds the limit, yet each frame still reports
        // a rising opacity.
        let mut last = None;
        let mut opacity = 0.0;
        for i in 1..=10 {
            let now = i as f64 * 120.0;
            let delta = frame_delta(last, now);
            assert_eq!(delta, 0.0);
            composer.on_frame((now / 1000.0) as f32, delta);
            let next = composer.opacity(now);
            assert!(next >= opacity);
            opacity = next;
            last = Some(now);
        }
        assert_eq!(opacity, 1.0);
    }
}
