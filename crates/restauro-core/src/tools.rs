//! Planning calculators for the render step.

use std::fmt;
use std::str::FromStr;

use crate::error::{RestauroError, Result};

/// Usable memory on the reference card (RTX 3060), in GB.
pub const VRAM_BUDGET_GB: f64 = 12.0;
const VRAM_BASE_GB: f64 = 2.2;
const VRAM_MODEL_GB: f64 = 5.5;
const VRAM_PER_PIXEL_FRAME_GB: f64 = 0.000_001_8;
const DANGER_ABOVE_GB: f64 = 11.5;
const WARNING_ABOVE_GB: f64 = 10.0;

/// Allowed latent batch sizes.
pub const BATCH_RANGE: std::ops::RangeInclusive<u32> = 1..=16;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Output frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        RESOLUTION_PRESETS[2].resolution
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = RestauroError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            RestauroError::invalid_input("resolution")
                .with_reason(format!("expected WIDTHxHEIGHT, got '{s}'"))
        };

        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self::new(width, height))
    }
}

/// A named resolution offered by the calculator.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionPreset {
    pub label: &'static str,
    pub resolution: Resolution,
}

pub const RESOLUTION_PRESETS: [ResolutionPreset; 5] = [
    ResolutionPreset {
        label: "SD Original",
        resolution: Resolution::new(720, 576),
    },
    ResolutionPreset {
        label: "HD 720p",
        resolution: Resolution::new(960, 720),
    },
    ResolutionPreset {
        label: "FHD 1080p - Recomendado",
        resolution: Resolution::new(1440, 1080),
    },
    ResolutionPreset {
        label: "2K",
        resolution: Resolution::new(1920, 1440),
    },
    ResolutionPreset {
        label: "4K - Arriscado",
        resolution: Resolution::new(2880, 2160),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VramRisk {
    Safe,
    Warning,
    Danger,
}

impl VramRisk {
    fn classify(gb: f64) -> Self {
        if gb > DANGER_ABOVE_GB {
            VramRisk::Danger
        } else if gb > WARNING_ABOVE_GB {
            VramRisk::Warning
        } else {
            VramRisk::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VramRisk::Safe => "safe",
            VramRisk::Warning => "warning",
            VramRisk::Danger => "danger",
        }
    }
}

/// Estimated memory use for one upscale pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VramEstimate {
    pub resolution: Resolution,
    pub batch: u32,
    /// Estimate in GB, two decimals
    pub gb: f64,
    pub risk: VramRisk,
    /// Share of [`VRAM_BUDGET_GB`], capped at 100
    pub budget_percent: f64,
}

/// Estimates VRAM for `resolution` at `batch` latent frames.
///
/// ```
/// use restauro_core::tools::{estimate_vram, Resolution, VramRisk};
///
/// let estimate = estimate_vram(Resolution::new(1440, 1080), 1).unwrap();
/// assert_eq!(estimate.gb, 10.5);
/// assert_eq!(estimate.risk, VramRisk::Warning);
/// ```
pub fn estimate_vram(resolution: Resolution, batch: u32) -> Result<VramEstimate> {
    if !BATCH_RANGE.contains(&batch) {
        return Err(RestauroError::invalid_input("batch").with_reason(format!(
            "must be between {} and {}",
            BATCH_RANGE.start(),
            BATCH_RANGE.end()
        )));
    }

    let processing = resolution.pixels() as f64 * f64::from(batch) * VRAM_PER_PIXEL_FRAME_GB;
    let gb = round2(VRAM_BASE_GB + VRAM_MODEL_GB + processing);

    Ok(VramEstimate {
        resolution,
        batch,
        gb,
        risk: VramRisk::classify(gb),
        budget_percent: (gb / VRAM_BUDGET_GB * 100.0).min(100.0),
    })
}

impl fmt::Display for VramEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Estimativa de VRAM\n")?;
        writeln!(f, "- **Resolução:** {}", self.resolution)?;
        writeln!(f, "- **Batch:** {} frames", self.batch)?;
        writeln!(
            f,
            "- **Uso estimado:** {:.2} GB / {VRAM_BUDGET_GB:.0} GB ({:.0}%)",
            self.gb, self.budget_percent
        )?;
        match self.risk {
            VramRisk::Danger => writeln!(f, "\n**PERIGO DE OOM (Out Of Memory)**"),
            VramRisk::Warning => writeln!(f, "\n*Perto do limite da placa.*"),
            VramRisk::Safe => Ok(()),
        }
    }
}

/// Target video bitrate in Mbps for a file of `size_gb` lasting `minutes`.
///
/// Returns `None` when the duration is not positive.
///
/// ```
/// use restauro_core::tools::estimate_bitrate;
///
/// assert_eq!(estimate_bitrate(60.0, 4.0), Some(9.1));
/// assert_eq!(estimate_bitrate(0.0, 4.0), None);
/// ```
pub fn estimate_bitrate(minutes: f64, size_gb: f64) -> Option<f64> {
    let seconds = minutes * 60.0;
    if seconds.is_nan() || seconds <= 0.0 {
        return None;
    }
    Some(round2(size_gb * 8192.0 / seconds))
}

/// Bitrate calculator input and result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitrateEstimate {
    pub minutes: f64,
    pub size_gb: f64,
    pub mbps: Option<f64>,
}

impl BitrateEstimate {
    pub fn new(minutes: f64, size_gb: f64) -> Self {
        Self {
            minutes,
            size_gb,
            mbps: estimate_bitrate(minutes, size_gb),
        }
    }
}

impl fmt::Display for BitrateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Calculadora de Bitrate\n")?;
        writeln!(f, "- **Duração:** {} min", self.minutes)?;
        writeln!(f, "- **Tamanho alvo:** {} GB", self.size_gb)?;
        match self.mbps {
            Some(mbps) => writeln!(f, "- **Bitrate:** {mbps:.2} Mbps")?,
            None => writeln!(f, "- **Bitrate:** indefinido (duração deve ser positiva)")?,
        }
        writeln!(
            f,
            "\nDica Pro: para arquivos master use CRF 16-18. Para distribuição (YouTube/Cliente), use VBR 15-25 Mbps."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vram_reference_values() {
        let sd = estimate_vram(Resolution::new(720, 576), 1).expect("estimate");
        assert_eq!(sd.gb, 8.45);
        assert_eq!(sd.risk, VramRisk::Safe);

        let uhd = estimate_vram(Resolution::new(2880, 2160), 1).expect("estimate");
        assert_eq!(uhd.gb, 18.9);
        assert_eq!(uhd.risk, VramRisk::Danger);
        assert_eq!(uhd.budget_percent, 100.0);
    }

    #[test]
    fn test_vram_risk_thresholds_are_exclusive() {
        assert_eq!(VramRisk::classify(10.0), VramRisk::Safe);
        assert_eq!(VramRisk::classify(10.01), VramRisk::Warning);
        assert_eq!(VramRisk::classify(11.5), VramRisk::Warning);
        assert_eq!(VramRisk::classify(11.51), VramRisk::Danger);
    }

    #[test]
    fn test_vram_batch_bounds() {
        let res = Resolution::default();
        assert!(estimate_vram(res, 0).is_err());
        assert!(estimate_vram(res, 17).is_err());
        assert!(estimate_vram(res, 16).is_ok());
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!("1920x1440".parse::<Resolution>().expect("parse"), Resolution::new(1920, 1440));
        assert_eq!(" 960X720 ".parse::<Resolution>().expect("parse"), Resolution::new(960, 720));
        assert!("1920".parse::<Resolution>().is_err());
        assert!("0x720".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_default_resolution_is_recommended_preset() {
        assert_eq!(Resolution::default(), Resolution::new(1440, 1080));
    }

    #[test]
    fn test_bitrate() {
        assert_eq!(estimate_bitrate(60.0, 4.0), Some(9.1));
        assert_eq!(estimate_bitrate(90.0, 10.0), Some(15.17));
        assert_eq!(estimate_bitrate(-5.0, 4.0), None);
        assert_eq!(estimate_bitrate(f64::NAN, 4.0), None);
    }

    #[test]
    fn test_bitrate_display_handles_undefined() {
        let text = BitrateEstimate::new(0.0, 4.0).to_string();
        assert!(text.contains("indefinido"));
    }
}
