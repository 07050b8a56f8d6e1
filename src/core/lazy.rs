//! Scroll-driven, burst-paced sequential image loading.
//!
//! The loader walks an ordered URL list one image at a time: the next load
//! starts only after the previous image's load event, so the natural width
//! is known before the placement width is chosen. After a burst of
//! consecutive loads it pauses instead of front-loading the whole list;
//! scroll events resume it. The DOM work (creating `<img>` elements,
//! appending placements, toggling the loading indicator) belongs to the
//! driver; this module is the pure state machine underneath it.

/// Width applied to a placed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthSpec {
    /// Explicit pixel width: `min(natural, viewport)`.
    Px(u32),
    /// Natural width unknown at placement time: 99% of the container.
    Fallback,
}

impl WidthSpec {
    /// Resolve the placement width from the image's natural width and the
    /// viewport width.
    pub fn resolve(natural_width: Option<u32>, viewport_width: u32) -> Self {
        match natural_width {
            Some(natural) => Self::Px(natural.min(viewport_width)),
            None => Self::Fallback,
        }
    }
}

/// One image placement emitted after its load event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub url: String,
    pub width: WidthSpec,
    /// 1-based position, for the "n/total" caption under the image.
    pub position: usize,
    pub total: usize,
}

/// What the driver must do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderStep {
    /// Begin loading this URL; report back via `image_loaded`.
    Load { url: String },
    /// Burst exhausted: wait for a scroll event.
    Pause,
    /// Every image is placed: hide the loading indicator, reveal the done
    /// control. Subsequent scrolls are no-ops.
    Finished,
}

/// Sequential batch loader for a list of image URLs.
#[derive(Debug, Default)]
pub struct LazyImageLoader {
    urls: Vec<String>,
    next: usize,
    burst_size: usize,
    burst_left: usize,
    in_flight: bool,
    /// Incremented on every `start`. A load event from a superseded run
    /// (the list was restarted while its image was in flight) carries a
    /// stale token and is discarded.
    run: u64,
}

impl LazyImageLoader {
    pub fn new(burst_size: usize) -> Self {
        Self {
            burst_size: burst_size.max(1),
            ..Default::default()
        }
    }

    /// Begin loading `urls` starting at `start_index`, superseding any
    /// earlier run whose load may still be outstanding.
    pub fn start(&mut self, urls: Vec<String>, start_index: usize) -> LoaderStep {
        self.urls = urls;
        self.next = start_index;
        self.burst_left = self.burst_size;
        self.in_flight = false;
        self.run += 1;
        self.advance()
    }

    /// Token identifying the current run. Captured when a load begins and
    /// passed back through [`Self::image_loaded`].
    pub fn run_token(&self) -> u64 {
        self.run
    }

    /// The previous image's load event fired; place it and decide what to
    /// do next.
    ///
    /// Returns `None` when `token` belongs to a superseded run; the stale
    /// event must place nothing and drive nothing.
    pub fn image_loaded(
        &mut self,
        token: u64,
        natural_width: Option<u32>,
        viewport_width: u32,
    ) -> Option<(Placement, LoaderStep)> {
        if token != self.run {
            return None;
        }
        debug_assert!(self.in_flight, "image_loaded without an outstanding load");
        self.in_flight = false;

        let placement = Placement {
            url: self.urls[self.next].clone(),
            width: WidthSpec::resolve(natural_width, viewport_width),
            position: self.next + 1,
            total: self.urls.len(),
        };
        self.next += 1;
        self.burst_left = self.burst_left.saturating_sub(1);

        Some((placement, self.advance()))
    }

    /// A scroll event arrived. Resumes loading only when the loader is
    /// paused with work remaining; while a load is outstanding or after
    /// completion this is a no-op.
    pub fn on_scroll(&mut self) -> Option<LoaderStep> {
        if self.in_flight || self.is_done() {
            return None;
        }
        self.burst_left = self.burst_size;
        Some(self.advance())
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.urls.len()
    }

    pub fn remaining(&self) -> usize {
        self.urls.len().saturating_sub(self.next)
    }

    fn advance(&mut self) -> LoaderStep {
        if self.is_done() {
            return LoaderStep::Finished;
        }
        if self.burst_left == 0 {
            return LoaderStep::Pause;
        }
        self.in_flight = true;
        LoaderStep::Load {
            url: self.urls[self.next].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/statics/img_{i:03}.jpg")).collect()
    }

    /// Drive the loader until it pauses or finishes, returning how many
    /// placements were made.
    fn drain(loader: &mut LazyImageLoader, mut step: LoaderStep) -> (usize, LoaderStep) {
        let mut placed = 0;
        while let LoaderStep::Load { .. } = step {
            let token = loader.run_token();
            let (_, next) = loader.image_loaded(token, Some(800), 640).unwrap();
            placed += 1;
            step = next;
        }
        (placed, step)
    }

    #[test]
    fn test_burst_pacing_with_scroll_resume() {
        let mut loader = LazyImageLoader::new(5);
        let step = loader.start(urls(12), 0);
        assert!(matches!(step, LoaderStep::Load { .. }));

        // Initial burst: 5 images, then pause with 7 remaining.
        let (placed, step) = drain(&mut loader, step);
        assert_eq!(placed, 5);
        assert_eq!(step, LoaderStep::Pause);
        assert_eq!(loader.remaining(), 7);

        // One scroll resumes a full burst.
        let step = loader.on_scroll().unwrap();
        let (placed, step) = drain(&mut loader, step);
        assert_eq!(placed, 5);
        assert_eq!(step, LoaderStep::Pause);
        assert_eq!(loader.remaining(), 2);

        // Final burst exhausts the list and finishes.
        let step = loader.on_scroll().unwrap();
        let (placed, step) = drain(&mut loader, step);
        assert_eq!(placed, 2);
        assert_eq!(step, LoaderStep::Finished);
        assert!(loader.is_done());

        // Further scrolls are no-ops.
        assert_eq!(loader.on_scroll(), None);
        assert_eq!(loader.on_scroll(), None);
    }

    #[test]
    fn test_scroll_during_load_is_ignored() {
        let mut loader = LazyImageLoader::new(5);
        let step = loader.start(urls(3), 0);
        assert!(matches!(step, LoaderStep::Load { .. }));
        // Load outstanding: scroll must not start a second one.
        assert_eq!(loader.on_scroll(), None);

        let token = loader.run_token();
        let (placement, _) = loader.image_loaded(token, Some(400), 640).unwrap();
        assert_eq!(placement.position, 1);
    }

    #[test]
    fn test_restart_discards_stale_load_events() {
        let mut loader = LazyImageLoader::new(5);
        let step = loader.start(urls(3), 0);
        assert!(matches!(step, LoaderStep::Load { .. }));
        let stale_token = loader.run_token();

        // The list is restarted (directory changed) while the first
        // image's load is still outstanding.
        let fresh: Vec<String> = (0..2).map(|i| format!("/statics/new_{i}.jpg")).collect();
        let step = loader.start(fresh, 0);
        assert_eq!(
            step,
            LoaderStep::Load { url: "/statics/new_0.jpg".to_string() }
        );

        // The stale run's load event arrives: it must place nothing, so
        // only the new run's own events advance the list.
        assert_eq!(loader.image_loaded(stale_token, Some(800), 640), None);
        assert_eq!(loader.remaining(), 2);

        let token = loader.run_token();
        let (placement, step) = loader.image_loaded(token, Some(400), 640).unwrap();
        assert_eq!(placement.url, "/statics/new_0.jpg");
        assert_eq!(placement.position, 1);
        assert_eq!(
            step,
            LoaderStep::Load { url: "/statics/new_1.jpg".to_string() }
        );
    }

    #[test]
    fn test_width_policy() {
        assert_eq!(WidthSpec::resolve(Some(1200), 640), WidthSpec::Px(640));
        assert_eq!(WidthSpec::resolve(Some(320), 640), WidthSpec::Px(320));
        assert_eq!(WidthSpec::resolve(None, 640), WidthSpec::Fallback);
    }

    #[test]
    fn test_placement_captions() {
        let mut loader = LazyImageLoader::new(5);
        let mut step = loader.start(urls(3), 0);
        let mut captions = Vec::new();
        while let LoaderStep::Load { .. } = step {
            let token = loader.run_token();
            let (placement, next) = loader.image_loaded(token, None, 640).unwrap();
            captions.push((placement.position, placement.total, placement.width));
            step = next;
        }
        assert_eq!(
            captions,
            vec![
                (1, 3, WidthSpec::Fallback),
                (2, 3, WidthSpec::Fallback),
                (3, 3, WidthSpec::Fallback),
            ]
        );
        assert_eq!(step, LoaderStep::Finished);
    }

    #[test]
    fn test_start_index_offset() {
        let mut loader = LazyImageLoader::new(5);
        let step = loader.start(urls(12), 10);
        assert_eq!(loader.remaining(), 2);
        let (placed, step) = drain(&mut loader, step);
        assert_eq!(placed, 2);
        assert_eq!(step, LoaderStep::Finished);
    }

    #[test]
    fn test_empty_list_finishes_immediately() {
        let mut loader = LazyImageLoader::new(5);
        assert_eq!(loader.start(Vec::new(), 0), LoaderStep::Finished);
        assert_eq!(loader.on_scroll(), None);
    }
}
