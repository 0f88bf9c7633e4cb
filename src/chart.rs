use crate::models::NormalizedVector;

pub const CHART_MAX: f64 = 10.0;
/// No screen-time metric is collected, so the axis sits at mid-scale.
pub const SCREEN_TIME_PLACEHOLDER: f64 = 5.0;

/// Reference maxima (hours) that map to a full chart axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub sleep: f64,
    pub study: f64,
    pub social: f64,
    pub exercise: f64,
}

impl Default for ChartScale {
    fn default() -> Self {
        Self {
            sleep: 9.0,
            study: 8.0,
            social: 4.0,
            exercise: 3.0,
        }
    }
}

impl ChartScale {
    /// Output order is Sleep, Study, Exercise, Social, Screen Time.
    pub fn normalize(&self, sleep: f64, study: f64, social: f64, exercise: f64) -> NormalizedVector {
        NormalizedVector([
            scale(sleep, self.sleep),
            scale(study, self.study),
            scale(exercise, self.exercise),
            scale(social, self.social),
            SCREEN_TIME_PLACEHOLDER,
        ])
    }
}

fn scale(value: f64, reference_max: f64) -> f64 {
    ((value / reference_max) * CHART_MAX).min(CHART_MAX)
}

pub fn normalize_for_chart(sleep: f64, study: f64, social: f64, exercise: f64) -> NormalizedVector {
    ChartScale::default().normalize(sleep, study, social, exercise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_maxima_saturate_every_axis() {
        let vector = normalize_for_chart(9.0, 8.0, 4.0, 3.0);
        assert_eq!(vector.values(), [10.0, 10.0, 10.0, 10.0, 5.0]);
    }

    #[test]
    fn values_above_maxima_are_capped() {
        let vector = normalize_for_chart(20.0, 16.0, 12.0, 9.0);
        assert_eq!(vector.values(), [10.0, 10.0, 10.0, 10.0, 5.0]);
    }

    #[test]
    fn exercise_and_social_swap_positions() {
        // social 2h of 4h -> 5, exercise 3h of 3h -> 10
        let vector = normalize_for_chart(0.0, 0.0, 2.0, 3.0);
        assert_eq!(vector.values(), [0.0, 0.0, 10.0, 5.0, 5.0]);
    }

    #[test]
    fn scales_partial_values() {
        let vector = normalize_for_chart(4.5, 4.0, 1.0, 1.5);
        assert_eq!(vector.values(), [5.0, 5.0, 5.0, 2.5, 5.0]);
    }

    #[test]
    fn custom_scale_overrides_maxima() {
        let scale = ChartScale {
            sleep: 10.0,
            ..ChartScale::default()
        };
        assert_eq!(scale.normalize(5.0, 0.0, 0.0, 0.0).values()[0], 5.0);
    }
}
