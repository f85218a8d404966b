//! Parsing of the generation-0 specifiers.
//!
//! `mutations` lists allele abbreviations (`"FeT"`: fur mutant dominant, ears
//! mutant recessive, teeth mutant dominant). `population` is either a single
//! count or expressions such as `"35FFeEtt"`: a count followed by two letters
//! for each gene named in `mutations`.
//!
//! Parsing is pure. Nothing is applied to the gene pool until the whole input
//! validated, so a rejected configuration leaves no partial state behind.

use crate::config::PopulationSpec;
use crate::error::InitializerError;
use crate::gene_pool::GenePool;
use bunnysim_data::{Allele, GeneKind, GenePair, Genotype};
use serde::{Deserialize, Serialize};

/// How many bunnies of one genotype to create at generation 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variety {
    pub count: u32,
    pub genotype: Genotype,
    /// Letters the genotype was parsed from; empty for the all-normal genotype.
    pub genotype_string: String,
}

/// A validated generation 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitialPopulation {
    /// Dominant allele for each gene named in `mutations`.
    pub dominance: Vec<(GeneKind, Allele)>,
    pub varieties: Vec<Variety>,
}

impl InitialPopulation {
    /// One bunny, no mutations.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            dominance: Vec::new(),
            varieties: vec![Variety {
                count: 1,
                genotype: Genotype::default(),
                genotype_string: String::new(),
            }],
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.varieties.iter().map(|v| u64::from(v.count)).sum()
    }
}

/// Parses `mutations` into the dominant allele requested for each gene.
pub fn parse_mutations(mutations: &str) -> Result<Vec<(GeneKind, Allele)>, InitializerError> {
    let mut dominance: Vec<(GeneKind, Allele)> = Vec::new();
    let mut letters: Vec<(GeneKind, bool)> = Vec::new();

    for letter in mutations.chars().filter(|c| !c.is_whitespace()) {
        let (gene, is_dominant) =
            GeneKind::from_abbreviation(letter).ok_or_else(|| {
                InitializerError::UnknownAbbreviation {
                    letter,
                    source_text: mutations.to_string(),
                }
            })?;
        if let Some(&(_, seen_dominant)) = letters.iter().find(|(g, _)| *g == gene) {
            return Err(if seen_dominant == is_dominant {
                InitializerError::DuplicateGene(mutations.to_string(), gene)
            } else {
                InitializerError::ConflictingDominance(mutations.to_string(), gene)
            });
        }
        letters.push((gene, is_dominant));
        // Upper case means the mutant is the dominant allele.
        let dominant = if is_dominant {
            gene.mutant_allele()
        } else {
            gene.normal_allele()
        };
        dominance.push((gene, dominant));
    }

    dominance.sort_by_key(|(gene, _)| *gene);
    Ok(dominance)
}

/// Validates the generation-0 specifiers against `max_population` and the
/// dominance already fixed in `gene_pool`.
pub fn parse_initial_population(
    mutations: &str,
    population: &PopulationSpec,
    max_population: u32,
    gene_pool: &GenePool,
) -> Result<InitialPopulation, InitializerError> {
    let dominance = parse_mutations(mutations)?;
    for &(gene, requested) in &dominance {
        if let Some(current) = gene_pool.gene(gene).dominant_allele() {
            if current != requested {
                return Err(InitializerError::DominanceConflict {
                    gene,
                    requested,
                    current,
                });
            }
        }
    }

    let expressions = population.expressions();
    if expressions.is_empty() {
        return Err(InitializerError::EmptyPopulation);
    }

    if dominance.is_empty() {
        let single = &expressions[0];
        if expressions.len() != 1 || !single.chars().all(|c| c.is_ascii_digit()) {
            return Err(InitializerError::ExpectedCount(expressions.join(" ")));
        }
    }

    let mut varieties = Vec::with_capacity(expressions.len());
    let mut total: u64 = 0;
    for expression in &expressions {
        let variety = parse_expression(expression, &dominance)?;
        total += u64::from(variety.count);
        if total >= u64::from(max_population) {
            return Err(InitializerError::TooManyBunnies {
                total,
                max: max_population,
            });
        }
        varieties.push(variety);
    }

    if total == 0 {
        return Err(InitializerError::ZeroPopulation);
    }

    Ok(InitialPopulation {
        dominance,
        varieties,
    })
}

fn parse_expression(
    expression: &str,
    dominance: &[(GeneKind, Allele)],
) -> Result<Variety, InitializerError> {
    let split = expression
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(expression.len());
    let (digits, letters) = expression.split_at(split);
    if digits.is_empty() {
        return Err(InitializerError::MissingCount(expression.to_string()));
    }
    let count = digits
        .parse::<u32>()
        .map_err(|_| InitializerError::CountOutOfRange(expression.to_string()))?;

    let letters: Vec<char> = letters.chars().collect();
    let expected = 2 * dominance.len();
    if letters.len() != expected {
        return Err(InitializerError::GenotypeLength {
            genotype: letters.iter().collect(),
            expected,
        });
    }

    let genotype_string: String = letters.iter().collect();
    let mut genotype = Genotype::default();
    let mut seen: Vec<GeneKind> = Vec::with_capacity(dominance.len());

    for pair in letters.chunks(2) {
        let father = resolve_letter(pair[0], &genotype_string, dominance)?;
        let mother = resolve_letter(pair[1], &genotype_string, dominance)?;
        if father.gene() != mother.gene() {
            return Err(InitializerError::MixedPair {
                genotype: genotype_string,
            });
        }
        let gene = father.gene();
        if seen.contains(&gene) {
            return Err(InitializerError::RepeatedGene {
                genotype: genotype_string,
                gene,
            });
        }
        seen.push(gene);
        *genotype.pair_mut(gene) = GenePair::new(father, mother);
    }

    Ok(Variety {
        count,
        genotype,
        genotype_string,
    })
}

fn resolve_letter(
    letter: char,
    genotype: &str,
    dominance: &[(GeneKind, Allele)],
) -> Result<Allele, InitializerError> {
    let (gene, is_dominant) =
        GeneKind::from_abbreviation(letter).ok_or_else(|| InitializerError::UnknownAbbreviation {
            letter,
            source_text: genotype.to_string(),
        })?;
    let dominant = dominance
        .iter()
        .find(|(g, _)| *g == gene)
        .map(|&(_, allele)| allele)
        .ok_or_else(|| InitializerError::GeneNotMutated {
            genotype: genotype.to_string(),
            gene,
        })?;
    Ok(if is_dominant {
        dominant
    } else if dominant == gene.normal_allele() {
        gene.mutant_allele()
    } else {
        gene.normal_allele()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exprs(items: &[&str]) -> PopulationSpec {
        PopulationSpec::Expressions(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_plain_count_without_mutations() {
        let parsed =
            parse_initial_population("", &PopulationSpec::Count(5), 750, &GenePool::new()).unwrap();
        assert!(parsed.dominance.is_empty());
        assert_eq!(parsed.varieties.len(), 1);
        assert_eq!(parsed.varieties[0].count, 5);
        assert_eq!(parsed.varieties[0].genotype, Genotype::default());
    }

    #[test]
    fn test_full_expression() {
        let parsed =
            parse_initial_population("FeT", &exprs(&["35FFeEtt"]), 750, &GenePool::new()).unwrap();
        assert_eq!(
            parsed.dominance,
            vec![
                (GeneKind::Fur, Allele::BrownFur),
                (GeneKind::Ears, Allele::StraightEars),
                (GeneKind::Teeth, Allele::LongTeeth),
            ]
        );
        let variety = &parsed.varieties[0];
        assert_eq!(variety.count, 35);
        assert_eq!(variety.genotype_string, "FFeEtt");
        assert_eq!(
            variety.genotype.fur,
            GenePair::new(Allele::BrownFur, Allele::BrownFur)
        );
        assert_eq!(
            variety.genotype.ears,
            GenePair::new(Allele::FloppyEars, Allele::StraightEars)
        );
        assert_eq!(
            variety.genotype.teeth,
            GenePair::new(Allele::ShortTeeth, Allele::ShortTeeth)
        );
    }

    #[test]
    fn test_unreferenced_genes_default_to_normal() {
        let parsed =
            parse_initial_population("f", &exprs(&["3fF", "2ff"]), 750, &GenePool::new()).unwrap();
        assert_eq!(parsed.total(), 5);
        assert_eq!(
            parsed.varieties[0].genotype.fur,
            GenePair::new(Allele::BrownFur, Allele::WhiteFur)
        );
        assert_eq!(parsed.varieties[1].genotype.ears, GenePair::normal(GeneKind::Ears));
    }

    #[test]
    fn test_gene_order_is_free() {
        let parsed =
            parse_initial_population("Ft", &exprs(&["4ttFf"]), 750, &GenePool::new()).unwrap();
        assert_eq!(
            parsed.varieties[0].genotype.teeth,
            GenePair::new(Allele::LongTeeth, Allele::LongTeeth)
        );
    }

    #[test]
    fn test_invalid_without_mutations() {
        let err = parse_initial_population("", &exprs(&["abc123"]), 750, &GenePool::new())
            .unwrap_err();
        assert!(matches!(err, InitializerError::ExpectedCount(_)));
    }

    #[test]
    fn test_missing_count() {
        let err =
            parse_initial_population("F", &exprs(&["FF"]), 750, &GenePool::new()).unwrap_err();
        assert_eq!(err, InitializerError::MissingCount("FF".to_string()));
    }

    #[test]
    fn test_conflicting_mutation_letters() {
        assert_eq!(
            parse_mutations("Ff"),
            Err(InitializerError::ConflictingDominance(
                "Ff".to_string(),
                GeneKind::Fur
            ))
        );
        assert!(matches!(
            parse_mutations("TT"),
            Err(InitializerError::DuplicateGene(_, GeneKind::Teeth))
        ));
        assert!(matches!(
            parse_mutations("Fx"),
            Err(InitializerError::UnknownAbbreviation { letter: 'x', .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let err = parse_initial_population("FE", &exprs(&["5FfE"]), 750, &GenePool::new())
            .unwrap_err();
        assert!(matches!(
            err,
            InitializerError::GenotypeLength { expected: 4, .. }
        ));
    }

    #[test]
    fn test_letter_for_unmutated_gene() {
        let err =
            parse_initial_population("F", &exprs(&["5Tt"]), 750, &GenePool::new()).unwrap_err();
        assert!(matches!(
            err,
            InitializerError::GeneNotMutated {
                gene: GeneKind::Teeth,
                ..
            }
        ));
    }

    #[test]
    fn test_mixed_and_repeated_pairs() {
        let mixed =
            parse_initial_population("FE", &exprs(&["5FEfe"]), 750, &GenePool::new()).unwrap_err();
        assert!(matches!(mixed, InitializerError::MixedPair { .. }));
        let repeated =
            parse_initial_population("FE", &exprs(&["5FfFf"]), 750, &GenePool::new()).unwrap_err();
        assert!(matches!(
            repeated,
            InitializerError::RepeatedGene {
                gene: GeneKind::Fur,
                ..
            }
        ));
    }

    #[test]
    fn test_population_must_stay_below_cap() {
        let err = parse_initial_population("F", &exprs(&["6FF", "4ff"]), 10, &GenePool::new())
            .unwrap_err();
        assert_eq!(err, InitializerError::TooManyBunnies { total: 10, max: 10 });
        assert!(parse_initial_population("F", &exprs(&["6FF", "3ff"]), 10, &GenePool::new()).is_ok());
    }

    #[test]
    fn test_zero_total_rejected() {
        let err =
            parse_initial_population("", &PopulationSpec::Count(0), 750, &GenePool::new()).unwrap_err();
        assert_eq!(err, InitializerError::ZeroPopulation);
    }

    #[test]
    fn test_conflict_with_existing_dominance() {
        let mut pool = GenePool::new();
        pool.gene_mut(GeneKind::Fur).add_mutation(false).unwrap();
        let err = parse_initial_population("F", &exprs(&["2FF"]), 750, &pool).unwrap_err();
        assert!(matches!(err, InitializerError::DominanceConflict { .. }));
        assert_eq!(
            err.to_string(),
            "mutations make brown fur dominant for fur, but white fur already is"
        );
        assert!(parse_initial_population("f", &exprs(&["2ff"]), 750, &pool).is_ok());
    }

    #[test]
    fn test_strict_caller_propagates_as_sim_error() {
        fn strict(population: &PopulationSpec) -> crate::Result<u64> {
            let parsed = parse_initial_population("", population, 750, &GenePool::new())?;
            Ok(parsed.total())
        }

        assert_eq!(strict(&PopulationSpec::Count(4)), Ok(4));
        assert_eq!(
            strict(&PopulationSpec::Count(0)),
            Err(crate::SimError::Initializer(InitializerError::ZeroPopulation))
        );
    }

    #[test]
    fn test_fallback_is_single_normal_bunny() {
        let fallback = InitialPopulation::fallback();
        assert_eq!(fallback.total(), 1);
        assert!(!fallback.varieties[0].genotype.has_mutation());
    }
}
