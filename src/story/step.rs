use serde::{Deserialize, Serialize};

/// One step of the narrative. Steps without a field show the parcels only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryStep {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "dataField")]
    pub field: Option<String>,
}

impl StoryStep {
    pub fn new(title: &str, field: Option<&str>) -> Self {
        Self { title: title.to_string(), description: None, field: field.map(str::to_string) }
    }

    #[inline] pub fn field(&self) -> Option<&str> { self.field.as_deref() }
}

/// Ordered list of story steps. Indices handed in by the UI are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StoryStep>", into = "Vec<StoryStep>")]
pub struct Story {
    steps: Vec<StoryStep>,
}

impl Story {
    /// Build a story; an empty list becomes a single overview step.
    pub fn new(steps: Vec<StoryStep>) -> Self {
        if steps.is_empty() {
            return Self { steps: vec![StoryStep::new("Overview", None)] };
        }
        Self { steps }
    }

    #[inline] pub fn len(&self) -> usize { self.steps.len() }

    #[inline] pub fn steps(&self) -> &[StoryStep] { &self.steps }

    /// Clamp an index into `0..len`.
    #[inline] pub fn clamp(&self, index: usize) -> usize { index.min(self.steps.len() - 1) }

    /// Step at `index`, clamped to the last step.
    #[inline] pub fn step(&self, index: usize) -> &StoryStep { &self.steps[self.clamp(index)] }

    #[inline] pub fn next(&self, index: usize) -> usize { self.clamp(index.saturating_add(1)) }

    #[inline] pub fn prev(&self, index: usize) -> usize { self.clamp(index).saturating_sub(1) }
}

impl From<Vec<StoryStep>> for Story {
    fn from(steps: Vec<StoryStep>) -> Self { Self::new(steps) }
}

impl From<Story> for Vec<StoryStep> {
    fn from(story: Story) -> Self { story.steps }
}

impl Default for Story {
    /// The Boston narrative: introduction, seven metrics, closing question.
    fn default() -> Self {
        Self::new(vec![
            StoryStep::new("Redlining", None),
            StoryStep::new("Redlining Grades", None),
            StoryStep::new("Transition", None),
            StoryStep::new("Unemployment % (2024)", Some("unemployment_pct")),
            StoryStep::new("Median Income (2024)", Some("Average_Income")),
            StoryStep::new("Mental Distress % (2024)", Some("mental_distress_pct")),
            StoryStep::new("Smoking % (2024)", Some("smoking_pct")),
            StoryStep::new("Crimes (2023)", Some("crime_count_all_years")),
            StoryStep::new("Evictions (2020-2024)", Some("eviction_count_all_years")),
            StoryStep::new("Crowded Housing % (2024)", Some("crowded_housing_pct")),
            StoryStep::new("Is Boston still suffering the effects of redlining?", None),
        ])
    }
}
