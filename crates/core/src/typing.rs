//! Human-like typing through key events.
//!
//! Text is typed one key event at a time with randomized gaps. A per-message
//! typo rate decides how often a wrong key is pressed first; half of those
//! mistakes are corrected with backspace and the rest are left in the message.
//! Unsupported characters are skipped without a command or a wait.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use adbflow_runtime::DeviceChannel;

use crate::command;
use crate::error::Result;
use crate::keymap::{self, KEYCODE_DEL, KEYCODE_ENTER};
use crate::pacing::{DelayRange, Pacer, RateRange, clamp_probability};

/// Timing and error parameters for one typing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingProfile {
	/// Range the per-message typo probability is drawn from.
	pub typo_rate: RateRange,
	/// Probability that an injected mistake is corrected with backspace.
	pub correction_probability: f64,
	/// Gap after each intended key.
	pub key_delay: DelayRange,
	/// Gap after a wrong key and after its correction.
	pub mistake_delay: DelayRange,
	/// Extra wait after `,` `.` `?` `!`.
	pub punctuation_pause: DelayRange,
	/// Longer wait every `thinking_every` typed characters.
	pub thinking_pause: DelayRange,
	/// Bounds for the thinking cadence, sampled once per run.
	pub thinking_every_min: usize,
	pub thinking_every_max: usize,
	/// Wait before pressing Enter.
	pub pre_submit: DelayRange,
}

impl Default for TypingProfile {
	fn default() -> Self {
		Self {
			typo_rate: RateRange::new(0.03, 0.10),
			correction_probability: 0.5,
			key_delay: DelayRange::new(80, 200),
			mistake_delay: DelayRange::new(100, 250),
			punctuation_pause: DelayRange::new(500, 1000),
			thinking_pause: DelayRange::new(700, 1500),
			thinking_every_min: 10,
			thinking_every_max: 14,
			pre_submit: DelayRange::new(1000, 4000),
		}
	}
}

impl TypingProfile {
	/// No typos and no waits; typing becomes a plain key sequence.
	pub fn instant() -> Self {
		Self {
			typo_rate: RateRange::fixed(0.0),
			correction_probability: 0.0,
			key_delay: DelayRange::ZERO,
			mistake_delay: DelayRange::ZERO,
			punctuation_pause: DelayRange::ZERO,
			thinking_pause: DelayRange::ZERO,
			thinking_every_min: usize::MAX,
			thinking_every_max: usize::MAX,
			pre_submit: DelayRange::ZERO,
		}
	}

	fn sample_cadence<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		let lo = self.thinking_every_min.min(self.thinking_every_max).max(1);
		let hi = self.thinking_every_min.max(self.thinking_every_max).max(1);
		rng.gen_range(lo..=hi)
	}
}

/// What a typing run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingReport {
	/// Intended characters typed.
	pub typed: usize,
	/// Wrong keys injected.
	pub mistakes: usize,
	/// Mistakes followed by a backspace.
	pub corrections: usize,
	/// Characters skipped because they have no key code.
	pub skipped: usize,
	pub thinking_pauses: usize,
}

/// Types text on one device through a [`DeviceChannel`].
pub struct TypingSimulator<'a> {
	channel: &'a dyn DeviceChannel,
	pacer: &'a dyn Pacer,
	profile: &'a TypingProfile,
}

impl<'a> TypingSimulator<'a> {
	pub fn new(channel: &'a dyn DeviceChannel, pacer: &'a dyn Pacer, profile: &'a TypingProfile) -> Self {
		Self {
			channel,
			pacer,
			profile,
		}
	}

	/// Types `text` and presses Enter.
	///
	/// # Errors
	///
	/// The first failed key event aborts the run and is returned; nothing is
	/// retried.
	pub async fn type_text<R>(&self, device: &str, text: &str, rng: &mut R) -> Result<TypingReport>
	where
		R: Rng + Send + ?Sized,
	{
		let typo_rate = self.profile.typo_rate.sample(rng);
		let correction = clamp_probability(self.profile.correction_probability);
		let cadence = self.profile.sample_cadence(rng);
		debug!(target = "adbflow.typing", device, typo_rate, cadence, chars = text.len(), "typing");

		let mut report = TypingReport::default();
		for ch in text.to_lowercase().chars() {
			let Some(code) = keymap::key_code(ch) else {
				report.skipped += 1;
				continue;
			};

			if rng.gen_bool(typo_rate) {
				let wrong = keymap::random_key(rng);
				self.press(device, wrong).await?;
				report.mistakes += 1;
				self.wait(self.profile.mistake_delay, rng).await;

				if rng.gen_bool(correction) {
					self.press(device, KEYCODE_DEL).await?;
					report.corrections += 1;
					self.wait(self.profile.mistake_delay, rng).await;
				}
			}

			self.press(device, code).await?;
			report.typed += 1;
			self.wait(self.profile.key_delay, rng).await;

			if keymap::is_punctuation(ch) {
				self.wait(self.profile.punctuation_pause, rng).await;
			}

			if report.typed % cadence == 0 {
				report.thinking_pauses += 1;
				self.wait(self.profile.thinking_pause, rng).await;
			}
		}

		self.wait(self.profile.pre_submit, rng).await;
		self.press(device, KEYCODE_ENTER).await?;

		debug!(
			target = "adbflow.typing",
			device,
			typed = report.typed,
			mistakes = report.mistakes,
			corrections = report.corrections,
			skipped = report.skipped,
			"typing finished"
		);
		Ok(report)
	}

	async fn press(&self, device: &str, code: u16) -> Result<()> {
		self.channel.execute(device, &command::keyevent(code)).await?;
		Ok(())
	}

	async fn wait<R: Rng + ?Sized>(&self, range: DelayRange, rng: &mut R) {
		let duration = range.sample(rng);
		self.pacer.pause(duration).await;
	}
}
