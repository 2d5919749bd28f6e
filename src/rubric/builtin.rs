//! The default speaking-introduction rubric.

use super::Criterion;

/// Eight criteria for a short self-introduction (weights sum to 100).
pub fn builtin_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new(
            "Salutation Level",
            "Quality and appropriateness of greeting (Hello everyone, Good morning, etc.)",
        )
        .with_keywords(
            "hello,hi,good morning,good afternoon,good evening,good day,greetings,excited,introduce",
        )
        .with_weight(5.0),
        Criterion::new(
            "Key Word Presence",
            "Includes essential information: name, age, class, school, family, hobbies/interests, goals, and unique facts",
        )
        .with_keywords(
            "name,age,class,school,family,mother,father,brother,sister,hobby,hobbies,interest,goal,dream,fun fact,special,unique",
        )
        .with_weight(30.0),
        Criterion::new(
            "Flow",
            "Introduction follows logical order: Salutation → Name → Mandatory details → Optional details → Closing",
        )
        .with_keywords("thank you,listening,conclude,finally,that's all,in conclusion")
        .with_weight(5.0),
        // ~52 seconds at 90–185 words per minute.
        Criterion::new(
            "Speech Rate",
            "Appropriate speaking pace (ideal: 111-140 words per minute for 52 seconds duration)",
        )
        .with_weight(10.0)
        .with_bounds(Some(80), Some(160)),
        Criterion::new(
            "Grammar",
            "Minimal grammatical errors, proper sentence structure and word usage",
        )
        .with_keywords("proper,correct,well-structured,grammatical")
        .with_weight(10.0),
        Criterion::new(
            "Vocabulary Richness",
            "Diverse and rich vocabulary usage (high type-token ratio)",
        )
        .with_keywords("interesting,fascinating,explore,discover,improve,special,unique,wonderful")
        .with_weight(10.0),
        Criterion::new(
            "Clarity",
            "Minimal use of filler words (um, uh, like, you know, so, actually, basically, right)",
        )
        .with_weight(15.0),
        Criterion::new(
            "Engagement",
            "Positive, enthusiastic, confident tone; shows interest and engagement",
        )
        .with_keywords(
            "enjoy,love,excited,happy,wonderful,great,special,interesting,fascinating,passionate",
        )
        .with_weight(15.0),
    ]
}
