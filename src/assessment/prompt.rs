// src/assessment/prompt.rs
// Builds the natural-language prompt sent to the model.

use crate::github::RepositoryMetadata;

const NO_DESCRIPTION: &str = "No description provided.";

pub fn build_prompt(metadata: &RepositoryMetadata, language_names: &[String]) -> String {
    let description = metadata
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    format!(
        "Analyze this GitHub repository and provide a professional assessment:\n\
         Repository: {full_name}\n\
         Description: {description}\n\
         Main Languages: {languages}\n\
         Topics: {topics}\n\
         Stars: {stars}\n\
         Forks: {forks}\n\
         \n\
         Please return a JSON object with:\n\
         1. A concise summary of what the project does.\n\
         2. Potential maintenance or architectural issues based on the metadata.\n\
         3. 3-5 actionable recommendations for the maintainers.\n\
         4. A project \"health score\" from 1-100.\n\
         5. Specific insights about the tech stack used.\n",
        full_name = metadata.full_name,
        description = description,
        languages = language_names.join(", "),
        topics = metadata.topics.join(", "),
        stars = metadata.stargazers_count,
        forks = metadata.forks_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepositoryOwner;
    use url::Url;

    fn metadata(description: Option<&str>) -> RepositoryMetadata {
        RepositoryMetadata {
            name: "colisseum".to_string(),
            full_name: "levy01/colisseum".to_string(),
            description: description.map(str::to_string),
            stargazers_count: 42,
            forks_count: 7,
            language: Some("JavaScript".to_string()),
            languages_url: Url::parse("https://api.github.com/repos/levy01/colisseum/languages")
                .unwrap(),
            html_url: Url::parse("https://github.com/levy01/colisseum").unwrap(),
            owner: RepositoryOwner {
                login: "levy01".to_string(),
                avatar_url: Url::parse("https://avatars.githubusercontent.com/u/1").unwrap(),
            },
            topics: vec!["game".to_string(), "arena".to_string()],
        }
    }

    #[test]
    fn test_prompt_embeds_metadata() {
        let languages = vec!["JavaScript".to_string(), "CSS".to_string()];
        let prompt = build_prompt(&metadata(Some("An arena")), &languages);

        assert!(prompt.contains("Repository: levy01/colisseum\n"));
        assert!(prompt.contains("Description: An arena\n"));
        assert!(prompt.contains("Main Languages: JavaScript, CSS\n"));
        assert!(prompt.contains("Topics: game, arena\n"));
        assert!(prompt.contains("Stars: 42\n"));
        assert!(prompt.contains("Forks: 7\n"));
    }

    #[test]
    fn test_prompt_placeholder_description() {
        let prompt = build_prompt(&metadata(None), &[]);
        assert!(prompt.contains("Description: No description provided.\n"));
        assert!(prompt.contains("Main Languages: \n"));
    }
}
