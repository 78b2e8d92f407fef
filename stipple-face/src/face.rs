//! Face driver
//!
//! Owns everything one display needs between frames: the canvas, the baked
//! brushes and the presenter holding what the panel currently shows.

use stipple_core::{debug, BrushCache, Canvas, RenderError};
use stipple_display::{DisplayError, FrameSink, PresentOutcome, Presenter};

use crate::clock::{render_observatory_clock, ClockAnimState, ClockData};
use crate::config::FaceConfig;

/// Observatory face bound to one display
pub struct ObservatoryFace {
    config: FaceConfig,
    canvas: Canvas,
    brushes: BrushCache,
    presenter: Presenter,
    partials_since_full: u32,
}

impl ObservatoryFace {
    /// Allocate the canvas and snapshot for `config`'s display size
    pub fn new(config: FaceConfig) -> Result<Self, RenderError> {
        let canvas = Canvas::new(config.width, config.height)?;
        let presenter = Presenter::for_surface(&canvas)?.with_min_gap(config.min_gap);
        Ok(Self {
            config,
            canvas,
            brushes: BrushCache::new(),
            presenter,
            partials_since_full: 0,
        })
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// The last rendered frame
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draw a frame without sending it
    pub fn render(&mut self, data: &ClockData, anim: &ClockAnimState) -> Result<(), RenderError> {
        render_observatory_clock(&mut self.canvas, data, anim, &self.config, &self.brushes)
    }

    /// Draw a frame and send what changed to `sink`
    ///
    /// Every `full_refresh_interval` partial refreshes the next frame is sent
    /// in full to clear ghosting.
    pub fn update<K: FrameSink + ?Sized>(
        &mut self,
        data: &ClockData,
        anim: &ClockAnimState,
        sink: &mut K,
    ) -> Result<PresentOutcome, DisplayError> {
        self.render(data, anim)?;

        let interval = self.config.full_refresh_interval;
        if interval != 0 && self.partials_since_full >= interval {
            debug!("{} partial refreshes since last full, forcing full", self.partials_since_full);
            self.presenter.force_full();
        }

        let outcome = self.presenter.present(&self.canvas, sink)?;
        match outcome {
            PresentOutcome::Full => self.partials_since_full = 0,
            PresentOutcome::Partial { .. } => self.partials_since_full += 1,
            PresentOutcome::Skipped => {}
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use stipple_core::dirty::DirtyRegion;

    #[derive(Default)]
    struct CountingSink {
        full: usize,
        rows: Vec<DirtyRegion>,
    }

    impl FrameSink for CountingSink {
        fn push_rows(&mut self, region: DirtyRegion, _rows: &[u8], _row_stride: usize) -> Result<(), DisplayError> {
            self.rows.push(region);
            Ok(())
        }

        fn push_full(&mut self, _buffer: &[u8]) -> Result<(), DisplayError> {
            self.full += 1;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    fn data(minutes: u8) -> ClockData {
        ClockData {
            hours: 9,
            minutes,
            day_of_week: 1,
            month: 6,
            day: 2,
            temp_f: 71,
            humidity: 40,
            battery: 100,
        }
    }

    #[test]
    fn test_update_cycle() {
        let mut face = ObservatoryFace::new(FaceConfig::default()).unwrap();
        let mut sink = CountingSink::default();
        let anim = ClockAnimState {
            elapsed: 1.0,
            show_colon: true,
        };

        assert_eq!(face.update(&data(15), &anim, &mut sink), Ok(PresentOutcome::Full));
        assert_eq!(face.update(&data(15), &anim, &mut sink), Ok(PresentOutcome::Skipped));

        let outcome = face.update(&data(16), &anim, &mut sink).unwrap();
        assert!(matches!(outcome, PresentOutcome::Partial { .. }));
        assert_eq!(sink.full, 1);
        assert!(!sink.rows.is_empty());
    }

    #[test]
    fn test_periodic_full_refresh() {
        let config = FaceConfig {
            full_refresh_interval: 2,
            ..Default::default()
        };
        let mut face = ObservatoryFace::new(config).unwrap();
        let mut sink = CountingSink::default();
        let anim = ClockAnimState::default();

        let outcomes: Vec<_> = (0..4)
            .map(|m| face.update(&data(m), &anim, &mut sink).unwrap())
            .collect();
        assert_eq!(outcomes[0], PresentOutcome::Full);
        assert!(matches!(outcomes[1], PresentOutcome::Partial { .. }));
        assert!(matches!(outcomes[2], PresentOutcome::Partial { .. }));
        assert_eq!(outcomes[3], PresentOutcome::Full);
        assert_eq!(sink.full, 2);
    }

    #[test]
    fn test_invalid_size() {
        let config = FaceConfig {
            width: 0,
            ..Default::default()
        };
        assert!(ObservatoryFace::new(config).is_err());
    }
}
