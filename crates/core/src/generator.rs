use async_trait::async_trait;

/// Produces the text typed into each chat.
///
/// Generation never fails from the caller's point of view: implementations
/// log their own errors and return an empty string, which makes the session
/// skip typing for that device.
#[async_trait]
pub trait TextGenerator: Send + Sync {
	async fn generate(&self, language: &str, topic: &str) -> String;
}

/// Fills `{language}` and `{topic}` in a prompt template.
pub fn render_prompt(template: &str, language: &str, topic: &str) -> String {
	template.replace("{language}", language).replace("{topic}", topic)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_both_placeholders() {
		let prompt = render_prompt("Say something in {language} about {topic}. Only {language}.", "Indonesian", "coffee");
		assert_eq!(prompt, "Say something in Indonesian about coffee. Only Indonesian.");
	}

	#[test]
	fn template_without_placeholders_is_unchanged() {
		assert_eq!(render_prompt("hello", "en", "x"), "hello");
	}
}
