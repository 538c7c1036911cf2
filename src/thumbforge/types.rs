//! Small value types shared by the flows: output shape, visual style and busy status.

use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

/// Output shape of a thumbnail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// `16:9`, regular video thumbnail.
    #[default]
    Landscape,
    /// `9:16`, vertical Shorts cover.
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    /// Human label used by front ends.
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "Landscape (16:9)",
            AspectRatio::Portrait => "Shorts (9:16)",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            other => Err(format!("unsupported aspect ratio '{}'", other)),
        }
    }
}

/// Visual style the subject and scene are transformed into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StyleTag {
    #[default]
    Animation3D,
    HyperRealistic3D,
    NaturalPhotography,
    CinematicRealistic,
    Anime,
    ComicBook,
    NeonCyberpunk,
}

impl StyleTag {
    /// Every style, in menu order.
    pub const ALL: [StyleTag; 7] = [
        StyleTag::Animation3D,
        StyleTag::HyperRealistic3D,
        StyleTag::NaturalPhotography,
        StyleTag::CinematicRealistic,
        StyleTag::Anime,
        StyleTag::ComicBook,
        StyleTag::NeonCyberpunk,
    ];

    /// Identifier sent to the image model.
    pub fn id(&self) -> &'static str {
        match self {
            StyleTag::Animation3D => "3D Animation",
            StyleTag::HyperRealistic3D => "3D Hyper-Realistic",
            StyleTag::NaturalPhotography => "Natural Photography",
            StyleTag::CinematicRealistic => "Cinematic Realistic",
            StyleTag::Anime => "Anime Style",
            StyleTag::ComicBook => "Comic Book",
            StyleTag::NeonCyberpunk => "Neon Cyberpunk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StyleTag::Animation3D => "3D Animation (Pixar Style)",
            StyleTag::HyperRealistic3D => "3D Render (High Quality)",
            StyleTag::NaturalPhotography => "Natural & Authentic",
            StyleTag::CinematicRealistic => "Cinematic Realistic",
            StyleTag::Anime => "Japanese Anime",
            StyleTag::ComicBook => "Comic / Pop Art",
            StyleTag::NeonCyberpunk => "Neon Cyberpunk",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StyleTag::Animation3D => "🧊",
            StyleTag::HyperRealistic3D => "🎲",
            StyleTag::NaturalPhotography => "🌿",
            StyleTag::CinematicRealistic => "📸",
            StyleTag::Anime => "🎋",
            StyleTag::ComicBook => "💥",
            StyleTag::NeonCyberpunk => "🤖",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StyleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StyleTag::ALL
            .iter()
            .copied()
            .find(|style| style.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown style '{}'", wanted))
    }
}

/// Whether a flow currently has a request outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowStatus {
    #[default]
    Idle,
    /// A title request is in flight.
    Loading,
    /// A thumbnail request is in flight.
    Generating,
}

impl FlowStatus {
    pub fn is_busy(&self) -> bool {
        !matches!(self, FlowStatus::Idle)
    }
}

/// Publishes a busy status for as long as it lives and `Idle` once dropped, including when
/// the owning future is dropped mid-request.
pub(crate) struct BusyGuard<'a> {
    status: &'a watch::Sender<FlowStatus>,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn new(status: &'a watch::Sender<FlowStatus>, busy: FlowStatus) -> Self {
        status.send_replace(busy);
        Self { status }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.status.send_replace(FlowStatus::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_parses_both_shapes() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Portrait));
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::default().to_string(), "16:9");
    }

    #[test]
    fn style_ids_round_trip_through_from_str() {
        for style in StyleTag::ALL {
            assert_eq!(style.id().parse::<StyleTag>(), Ok(style));
        }
        assert_eq!("anime style".parse::<StyleTag>(), Ok(StyleTag::Anime));
        assert_eq!(StyleTag::default().id(), "3D Animation");
    }

    #[test]
    fn busy_guard_returns_to_idle_when_dropped() {
        let (tx, rx) = watch::channel(FlowStatus::Idle);
        {
            let _busy = BusyGuard::new(&tx, FlowStatus::Generating);
            assert_eq!(*rx.borrow(), FlowStatus::Generating);
        }
        assert_eq!(*rx.borrow(), FlowStatus::Idle);
    }
}
