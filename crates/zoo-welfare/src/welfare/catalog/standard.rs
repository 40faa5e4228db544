use std::collections::BTreeMap;

use super::domain::{AnswerOption, Category, OptionLetter, QuestionDraft};

/// Points awarded per letter in the canonical catalog: A is best, E is worst.
const LETTER_POINTS: [(OptionLetter, u8); 5] = [
    (OptionLetter::A, 5),
    (OptionLetter::B, 4),
    (OptionLetter::C, 3),
    (OptionLetter::D, 2),
    (OptionLetter::E, 1),
];

struct QuestionTemplate {
    text: &'static str,
    category: Category,
    /// Labels for A..E; `None` marks an intentionally absent option.
    labels: [Option<&'static str>; 5],
}

impl QuestionTemplate {
    fn to_draft(&self) -> QuestionDraft {
        let options: BTreeMap<OptionLetter, AnswerOption> = LETTER_POINTS
            .iter()
            .zip(self.labels.iter())
            .filter_map(|((letter, points), label)| {
                label.map(|label| {
                    (
                        *letter,
                        AnswerOption {
                            label: label.to_string(),
                            points: *points,
                        },
                    )
                })
            })
            .collect();

        QuestionDraft {
            text: self.text.to_string(),
            category: self.category,
            options,
        }
    }
}

pub(crate) fn standard_question_drafts() -> Vec<QuestionDraft> {
    STANDARD_TEMPLATES.iter().map(QuestionTemplate::to_draft).collect()
}

const STANDARD_TEMPLATES: &[QuestionTemplate] = &[
    QuestionTemplate {
        text: "Is the animal in good body condition for its species, age, sex and physiological state?",
        category: Category::Nutrition,
        labels: [
            Some("Optimal body condition"),
            Some("Slightly under or over the optimal condition"),
            Some("Noticeably under or over the optimal condition"),
            Some("Poor condition, veterinary follow-up needed"),
            Some("Emaciated or obese"),
        ],
    },
    QuestionTemplate {
        text: "Is the diet nutritionally adequate and safe for the individual?",
        category: Category::Nutrition,
        labels: [
            Some("Yes, formulated for the individual"),
            None,
            Some("Adequate for the species but not adjusted to the individual"),
            None,
            Some("No, the diet is not adequate"),
        ],
    },
    QuestionTemplate {
        text: "Is the food offered in good condition?",
        category: Category::Nutrition,
        labels: [
            Some("Yes, no alterations"),
            Some("One item shows a minor alteration"),
            Some("One item shows several alterations"),
            Some("Several items show alterations"),
            Some("Food is spoiled or contaminated"),
        ],
    },
    QuestionTemplate {
        text: "Is food preparation hygienic?",
        category: Category::Nutrition,
        labels: [
            Some("Yes"),
            None,
            Some("Minor hygiene lapses observed"),
            None,
            Some("No"),
        ],
    },
    QuestionTemplate {
        text: "Is the water offered clean, sufficient and accessible at all times?",
        category: Category::Nutrition,
        labels: [
            Some("Clean, sufficient and always accessible"),
            Some("Meets all criteria with minor turbidity or debris"),
            Some("Fails one criterion without preventing intake"),
            Some("Fails two criteria"),
            Some("Intake is obstructed or water is unfit"),
        ],
    },
    QuestionTemplate {
        text: "Does food and water presentation respect how the species feeds and drinks in the wild?",
        category: Category::Nutrition,
        labels: [
            Some("Fully respects natural feeding behavior"),
            Some("Mostly respects natural feeding behavior"),
            Some("Partially respects natural feeding behavior"),
            Some("Rarely respects natural feeding behavior"),
            Some("Does not respect natural feeding behavior"),
        ],
    },
    QuestionTemplate {
        text: "Is the enclosure safe and does it allow the animal to express its behaviors?",
        category: Category::Housing,
        labels: [
            Some("Yes"),
            Some("Safe, with minor behavioral restrictions"),
            Some("Partially, one criterion is not met"),
            Some("Two criteria are not met"),
            Some("Unsafe or highly restrictive"),
        ],
    },
    QuestionTemplate {
        text: "Is the substrate suitable for resting comfortably and for species-typical behavior?",
        category: Category::Housing,
        labels: [
            Some("Suitable"),
            None,
            Some("Prevents one species-specific behavior"),
            None,
            Some("Unsuitable for rest and prevents several behaviors"),
        ],
    },
    QuestionTemplate {
        text: "Are thermal conditions (temperature, humidity, ventilation) adequate for comfort?",
        category: Category::Housing,
        labels: [
            Some("Allow full thermal comfort"),
            Some("Comfortable with short periods of deviation"),
            Some("One aspect is deficient without risk to life"),
            Some("Two aspects are deficient"),
            Some("Deficiencies put the animal at risk"),
        ],
    },
    QuestionTemplate {
        text: "Do enclosure dimensions let the animal move freely and meet minimum space requirements?",
        category: Category::Housing,
        labels: [
            Some("Meet recommendations and allow free movement"),
            Some("Allow free movement, slightly under recommendations"),
            Some("Allow movement but restrict body expression"),
            Some("Movement is noticeably restricted"),
            Some("Do not allow free movement"),
        ],
    },
    QuestionTemplate {
        text: "Does the enclosure provide shelter from adverse weather?",
        category: Category::Housing,
        labels: [
            Some("Full protection"),
            None,
            Some("Partial protection"),
            None,
            Some("No protection or no shelter"),
        ],
    },
    QuestionTemplate {
        text: "Can the animal withdraw from public view to reduce stress?",
        category: Category::Housing,
        labels: [
            Some("Yes, several retreat areas"),
            Some("Yes, one retreat area"),
            Some("Partially"),
            Some("Rarely, retreat areas are inadequate"),
            Some("No, the animal is always exposed"),
        ],
    },
    QuestionTemplate {
        text: "Is the animal free of injuries or wounds?",
        category: Category::Health,
        labels: [
            Some("No injuries or wounds"),
            Some("Minor superficial marks"),
            Some("Small wounds without infection"),
            Some("Several wounds or signs of infection"),
            Some("Deep, infected or numerous wounds"),
        ],
    },
    QuestionTemplate {
        text: "Are hooves, nails, claws, beak and teeth free of overgrowth or lesions?",
        category: Category::Health,
        labels: [
            Some("Free of overgrowth and lesions"),
            Some("Slight overgrowth"),
            Some("Moderate overgrowth without lesions"),
            Some("Marked overgrowth"),
            Some("Severe overgrowth or lesions"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal have a preventive and emergency health program?",
        category: Category::Health,
        labels: [
            Some("Yes"),
            None,
            Some("Emergency care only"),
            None,
            Some("No"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal move without difficulty or signs of pain?",
        category: Category::Health,
        labels: [
            Some("Moves freely without signs of pain"),
            Some("Occasional stiffness"),
            Some("Mild lameness"),
            Some("Moderate lameness"),
            Some("Severe lameness or obvious pain"),
        ],
    },
    QuestionTemplate {
        text: "Does the activity pattern match the species' circadian rhythm?",
        category: Category::Health,
        labels: [
            Some("Matches the free-ranging rhythm"),
            None,
            Some("Partially shifted"),
            None,
            Some("Does not match"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal appear healthy and free of signs of disease?",
        category: Category::Health,
        labels: [
            Some("Clinically healthy"),
            Some("Minor signs with good prognosis"),
            Some("Mild or recent symptoms"),
            Some("Moderate symptoms"),
            Some("Severe or chronic symptoms with poor prognosis"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal show abnormal behavior such as stereotypies or apathy?",
        category: Category::Behavior,
        labels: [
            Some("No signs of abnormal behavior"),
            Some("Rare, brief episodes"),
            Some("Mild signs"),
            Some("Moderate signs"),
            Some("Severe or multiple abnormal behaviors"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal interact with environmental enrichment?",
        category: Category::Behavior,
        labels: [
            Some("Interacts directly or indirectly"),
            Some("Interacts occasionally"),
            Some("Shows interest without using it"),
            Some("Rarely shows interest"),
            Some("Shows no interest"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal perform species-specific behaviors matching its needs and dynamics?",
        category: Category::Behavior,
        labels: [
            Some("Yes, natural repertoire observed"),
            Some("Most of the natural repertoire observed"),
            Some("Differs from the repertoire without causing stress"),
            Some("Limited repertoire"),
            Some("Differs and causes stress"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal use all of the available space?",
        category: Category::Behavior,
        labels: [
            Some("Uses most or all of the space"),
            Some("Uses most areas"),
            Some("Always uses the same areas"),
            Some("Uses a small part of the enclosure"),
            Some("Confined to a minimal area"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal explore its enclosure and react to relevant stimuli?",
        category: Category::Behavior,
        labels: [
            Some("Explores spontaneously"),
            None,
            Some("Explores only in response to new stimuli"),
            None,
            Some("No exploration observed"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal have a positive relationship with its caretakers?",
        category: Category::Behavior,
        labels: [
            Some("Alert and approaches"),
            Some("Relaxed"),
            Some("Indifferent"),
            Some("Avoidant"),
            Some("Fear or agonistic behavior"),
        ],
    },
    QuestionTemplate {
        text: "Is the animal indifferent to the public, unfamiliar staff or observers?",
        category: Category::MentalState,
        labels: [
            Some("Indifferent or positive"),
            None,
            Some("Occasionally wary"),
            None,
            Some("Fear, hiding, aggression or freezing"),
        ],
    },
    QuestionTemplate {
        text: "Does the enclosure design let the animal choose where to be and what to do?",
        category: Category::MentalState,
        labels: [
            Some("Yes, throughout the day"),
            Some("Yes, during most of the day"),
            Some("During the most active period only"),
            Some("Few choices available"),
            Some("No meaningful choice or control"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal have an environmental enrichment plan?",
        category: Category::MentalState,
        labels: [
            Some("Yes, a documented and rotated plan"),
            Some("Yes, a documented plan"),
            Some("Enrichment offered without a plan"),
            Some("Enrichment offered rarely"),
            Some("No enrichment"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal follow a positive-reinforcement training plan?",
        category: Category::MentalState,
        labels: [
            Some("Complete training plan"),
            Some("Training covers most husbandry needs"),
            Some("Only veterinary and handling maneuvers"),
            Some("Sporadic training"),
            Some("No training or aversive methods"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal display positive affective states such as play or relaxed postures?",
        category: Category::MentalState,
        labels: [
            Some("Frequently"),
            Some("Regularly"),
            Some("Occasionally"),
            Some("Rarely"),
            Some("Never"),
        ],
    },
    QuestionTemplate {
        text: "Does the animal recover quickly after stressful events such as handling or noise?",
        category: Category::MentalState,
        labels: [
            Some("Recovers within minutes"),
            None,
            Some("Recovers within hours"),
            None,
            Some("Remains stressed for a day or longer"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::welfare::catalog::domain::QuestionId;

    #[test]
    fn standard_catalog_has_thirty_questions_across_five_categories() {
        let drafts = standard_question_drafts();
        assert_eq!(drafts.len(), 30);

        for category in Category::ordered() {
            let count = drafts
                .iter()
                .filter(|draft| draft.category == category)
                .count();
            assert_eq!(count, 6, "{} should hold six questions", category.label());
        }
    }

    #[test]
    fn every_standard_question_has_best_middle_and_worst_options() {
        for (index, draft) in standard_question_drafts().into_iter().enumerate() {
            for letter in [OptionLetter::A, OptionLetter::C, OptionLetter::E] {
                assert!(
                    draft.options.contains_key(&letter),
                    "question {} is missing option {letter}",
                    index + 1
                );
            }
            let question = draft.into_question(QuestionId(index as u32 + 1));
            question.validate().expect("standard question validates");
            assert_eq!(question.options_by_points()[0].1.points, 5);
        }
    }

    #[test]
    fn absent_options_are_not_materialized() {
        let drafts = standard_question_drafts();
        let hygiene = drafts
            .iter()
            .find(|draft| draft.text.starts_with("Is food preparation hygienic"))
            .expect("hygiene question present");

        assert!(!hygiene.options.contains_key(&OptionLetter::B));
        assert!(!hygiene.options.contains_key(&OptionLetter::D));
        assert_eq!(hygiene.options.len(), 3);
    }
}
