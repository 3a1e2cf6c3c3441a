//! Hero background: looping video when the visitor can afford it, the static
//! image otherwise. Decided once per page load.

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{ConnectionHints, Display, Host, PlayAttempt, PlaybackOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroMode {
    Video,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReason {
    ReducedMotion,
    SaveData,
    SlowConnection(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroDecision {
    Image(ImageReason),
    TryVideo,
}

/// Reduced motion wins over everything, then data saving, then a known
/// effective type below `fast_connection`. Unknown connections get the video.
pub fn decide(
    reduced_motion: bool,
    connection: Option<&ConnectionHints>,
    fast_connection: &str,
) -> HeroDecision {
    if reduced_motion {
        return HeroDecision::Image(ImageReason::ReducedMotion);
    }
    if let Some(hints) = connection {
        if hints.save_data {
            return HeroDecision::Image(ImageReason::SaveData);
        }
        if let Some(kind) = hints.effective_type.as_deref() {
            if kind != fast_connection {
                return HeroDecision::Image(ImageReason::SlowConnection(kind.to_string()));
            }
        }
    }
    HeroDecision::TryVideo
}

#[derive(Clone)]
pub struct HeroMedia<H: Host> {
    host: H,
    video: H::Element,
    image: Option<H::Element>,
    mode: Rc<Cell<Option<HeroMode>>>,
}

impl<H: Host> HeroMedia<H> {
    pub fn new(host: H, video: H::Element, image: Option<H::Element>) -> Self {
        Self {
            host,
            video,
            image,
            mode: Rc::new(Cell::new(None)),
        }
    }

    /// `None` until the play attempt settles.
    pub fn mode(&self) -> Option<HeroMode> {
        self.mode.get()
    }

    fn show(&self, mode: HeroMode) {
        let (video, image) = match mode {
            HeroMode::Video => (Display::Block, Display::None),
            HeroMode::Image => (Display::None, Display::Block),
        };
        self.host.set_display(&self.video, video);
        if let Some(img) = &self.image {
            self.host.set_display(img, image);
        }
        self.mode.set(Some(mode));
    }

    pub fn select(&self, fast_connection: &str) -> HeroDecision {
        let connection = self.host.connection();
        let decision = decide(
            self.host.prefers_reduced_motion(),
            connection.as_ref(),
            fast_connection,
        );
        match &decision {
            HeroDecision::Image(reason) => {
                log::info!("Hero shows static image: {:?}", reason);
                self.show(HeroMode::Image);
            }
            HeroDecision::TryVideo => self.try_play(),
        }
        decision
    }

    fn try_play(&self) {
        let hero = self.clone();
        let attempt = self.host.play_video(
            &self.video,
            Box::new(move |outcome: PlaybackOutcome| match outcome {
                PlaybackOutcome::Playing => hero.show(HeroMode::Video),
                PlaybackOutcome::Rejected(reason) => {
                    log::warn!("Hero video did not start, using image: {}", reason);
                    hero.show(HeroMode::Image);
                }
            }),
        );
        if attempt == PlayAttempt::Immediate {
            self.show(HeroMode::Video);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeHost, NodeId, PlaybackBehaviour};
    use pretty_assertions::assert_eq;

    fn hints(save_data: bool, effective_type: Option<&str>) -> ConnectionHints {
        ConnectionHints {
            save_data,
            effective_type: effective_type.map(str::to_string),
        }
    }

    fn setup() -> (FakeHost, HeroMedia<FakeHost>, NodeId, NodeId) {
        let host = FakeHost::new();
        let video = host.create_with_id("video", "hero-video");
        let image = host.create_with_id("img", "hero-image");
        let hero = HeroMedia::new(host.clone(), video, Some(image));
        (host, hero, video, image)
    }

    #[test]
    fn decision_priority() {
        let slow = hints(false, Some("3g"));
        assert_eq!(
            decide(true, Some(&slow), "4g"),
            HeroDecision::Image(ImageReason::ReducedMotion)
        );
        assert_eq!(
            decide(false, Some(&hints(true, Some("4g"))), "4g"),
            HeroDecision::Image(ImageReason::SaveData)
        );
        assert_eq!(
            decide(false, Some(&slow), "4g"),
            HeroDecision::Image(ImageReason::SlowConnection("3g".to_string()))
        );
        assert_eq!(
            decide(false, Some(&hints(false, Some("4g"))), "4g"),
            HeroDecision::TryVideo
        );
        assert_eq!(decide(false, Some(&hints(false, None)), "4g"), HeroDecision::TryVideo);
        assert_eq!(decide(false, None, "4g"), HeroDecision::TryVideo);
    }

    #[test]
    fn reduced_motion_never_plays() {
        let (host, hero, video, image) = setup();
        host.set_reduced_motion(true);
        hero.select("4g");
        assert_eq!(host.play_calls(), 0);
        assert_eq!(host.display(video), Some(Display::None));
        assert_eq!(host.display(image), Some(Display::Block));
        assert_eq!(hero.mode(), Some(HeroMode::Image));
    }

    #[test]
    fn save_data_skips_playback() {
        let (host, hero, _, image) = setup();
        host.set_connection(Some(hints(true, None)));
        hero.select("4g");
        assert_eq!(host.play_calls(), 0);
        assert_eq!(host.display(image), Some(Display::Block));
    }

    #[test]
    fn successful_play_shows_video() {
        let (host, hero, video, image) = setup();
        hero.select("4g");
        assert_eq!(host.play_calls(), 1);
        assert_eq!(hero.mode(), None);

        host.settle_playback();
        assert_eq!(host.display(video), Some(Display::Block));
        assert_eq!(host.display(image), Some(Display::None));
        assert_eq!(hero.mode(), Some(HeroMode::Video));
    }

    #[test]
    fn rejected_play_falls_back_to_image() {
        let (host, hero, video, image) = setup();
        host.set_playback(PlaybackBehaviour::Reject("NotAllowedError".to_string()));
        hero.select("4g");
        host.settle_playback();
        assert_eq!(host.display(video), Some(Display::None));
        assert_eq!(host.display(image), Some(Display::Block));
    }

    #[test]
    fn missing_promise_keeps_video() {
        let (host, hero, video, _) = setup();
        host.set_playback(PlaybackBehaviour::NoPromise);
        hero.select("4g");
        assert_eq!(host.display(video), Some(Display::Block));
        assert_eq!(hero.mode(), Some(HeroMode::Video));
    }
}
