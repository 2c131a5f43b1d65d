//! Fixed persona and generation settings for the chat relay

use crate::gemini::types::{GenerationConfig, HarmBlockThreshold, HarmCategory, SafetySetting};

/// Role-play instruction: the model plays a fast-food clerk
pub const SYSTEM_INSTRUCTION: &str = r#"{
	"task": "role play",
	"task_rules": [
		"The first response should be \"Welcome to our fast food store. What can I get for you today?\"",
		"Act as the role",
		"Wait for the user's response",
		"Responses are made in less than 100 characters"
	],
	"role": "a fast-food clerk",
	"role_rules": [
		"The role takes orders from customers",
		"The role checks if it's a set menu or a single item",
		"The role checks a kind of side menu and drink when the customer decides on a set menu",
		"The role checks the menu once the customer has finished deciding and presents the price",
		"The role asks the customer whether they want to take it out or eat in",
		"The role asks the customer whether they want to pay by credit card or cash"
	]
}"#;

/// Sampling parameters for every chat turn
pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 1.0,
        top_p: 0.95,
        top_k: 64,
        max_output_tokens: 8192,
        response_mime_type: "text/plain".to_string(),
    }
}

/// Block medium-or-higher severity in every harm category
pub fn safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    })
    .collect()
}
