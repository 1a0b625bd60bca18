use crate::error::Error;
use crate::length_class::LengthClass;
use crate::Generator;
use keyhole_core::ShortId;
use rand::distr::Alphanumeric;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Configures how many characters each length class produces.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct GeneratorSettings {
    #[builder(default = 4)]
    pub very_short_len: usize,
    #[builder(default = 6)]
    pub short_len: usize,
    #[builder(default = 8)]
    pub medium_len: usize,
    #[builder(default = 12)]
    pub very_long_len: usize,
}

impl GeneratorSettings {
    /// The configured character count for `class`.
    pub fn len_of(&self, class: LengthClass) -> usize {
        match class {
            LengthClass::VeryShort => self.very_short_len,
            LengthClass::Short => self.short_len,
            LengthClass::Medium => self.medium_len,
            LengthClass::VeryLong => self.very_long_len,
        }
    }
}

/// Random alphanumeric identifier generator.
///
/// Characters are drawn uniformly from `[A-Za-z0-9]`; the requested class
/// fixes the length and nothing else. Two draws of the same class can
/// collide, which the persistence layer surfaces through its unique index.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    settings: GeneratorSettings,
}

impl RandomGenerator {
    /// Creates a generator after validating `settings`.
    ///
    /// Lengths must be at least 1 and strictly increase from
    /// [`LengthClass::VeryShort`] to [`LengthClass::VeryLong`]; otherwise a
    /// longer class would not widen the identifier space.
    pub fn new(settings: GeneratorSettings) -> Result<Self, Error> {
        for class in LengthClass::ALL {
            if settings.len_of(class) == 0 {
                return Err(Error::EmptyLength { class });
            }
        }
        for pair in LengthClass::ALL.windows(2) {
            let (shorter, longer) = (pair[0], pair[1]);
            if settings.len_of(shorter) >= settings.len_of(longer) {
                return Err(Error::NonIncreasingLengths {
                    shorter,
                    shorter_len: settings.len_of(shorter),
                    longer,
                    longer_len: settings.len_of(longer),
                });
            }
        }
        Ok(Self { settings })
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, class: LengthClass) -> ShortId {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.settings.len_of(class))
            .map(char::from)
            .collect();
        ShortId::new(id)
    }
}
