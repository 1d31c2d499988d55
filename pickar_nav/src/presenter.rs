// Path presentation boundary.
//
// The router never draws anything itself. It hands the assembled polyline to
// a `PathPresenter` owned by the host application (a line renderer, a debug
// overlay, a log sink) and asks it to clear the display when there is no
// active goal. That two-call contract is the whole interface.
//
// `RecordingPresenter` keeps the current polyline in memory. Tests use it to
// observe what would have been drawn, and the CLI prints from it.

use crate::types::Vec3;

pub trait PathPresenter {
    /// Replace any displayed path with this polyline.
    fn render(&mut self, points: &[Vec3]);

    /// Remove any displayed path.
    fn clear(&mut self);
}

/// A presenter that remembers the last polyline instead of drawing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingPresenter {
    current: Option<Vec<Vec3>>,
    pub render_count: usize,
    pub clear_count: usize,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The polyline currently "on screen", if any.
    pub fn current(&self) -> Option<&[Vec3]> {
        self.current.as_deref()
    }
}

impl PathPresenter for RecordingPresenter {
    fn render(&mut self, points: &[Vec3]) {
        self.current = Some(points.to_vec());
        self.render_count += 1;
    }

    fn clear(&mut self) {
        self.current = None;
        self.clear_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_and_clear_removes() {
        let mut presenter = RecordingPresenter::new();
        presenter.render(&[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
        presenter.render(&[Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]);
        assert_eq!(
            presenter.current(),
            Some(&[Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)][..])
        );
        presenter.clear();
        assert_eq!(presenter.current(), None);
        assert_eq!((presenter.render_count, presenter.clear_count), (2, 1));
    }
}
