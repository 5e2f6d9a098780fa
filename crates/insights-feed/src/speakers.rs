use insights_client::{ALL, Speaker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerFilter {
    pub search: String,
    pub department: String,
    pub region: String,
}

impl Default for SpeakerFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            department: ALL.to_string(),
            region: ALL.to_string(),
        }
    }
}

impl SpeakerFilter {
    pub fn matches(&self, speaker: &Speaker) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = speaker.display_name.to_lowercase().contains(&needle)
            || speaker.department.to_lowercase().contains(&needle);

        matches_search
            && matches_choice(&self.department, &speaker.department)
            && matches_choice(&self.region, &speaker.region)
    }

    pub fn apply<'a>(&self, speakers: &'a [Speaker]) -> Vec<&'a Speaker> {
        speakers.iter().filter(|s| self.matches(s)).collect()
    }
}

fn matches_choice(choice: &str, value: &str) -> bool {
    choice.is_empty() || choice == ALL || choice == value
}

pub fn departments(speakers: &[Speaker]) -> Vec<String> {
    distinct(speakers.iter().map(|s| s.department.as_str()))
}

pub fn regions(speakers: &[Speaker]) -> Vec<String> {
    distinct(speakers.iter().map(|s| s.region.as_str()))
}

// First-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
