// rules.rs - Ordered birth/survival rules and the stochastic fallback

use std::fmt;

use rand::Rng;

use crate::config::LifeConfig;

/// Outcome of the deterministic rules for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Alive,
    Dead,
    /// Dead cell that no birth rule claimed; spontaneous birth decides.
    Open,
}

/// A cell in state `when_alive` with a neighbor count in `counts` is alive next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub when_alive: bool,
    counts: [bool; 9],
}

impl Rule {
    pub const fn new(name: &'static str, when_alive: bool, neighbor_counts: &[u8]) -> Self {
        let mut counts = [false; 9];
        let mut i = 0;
        while i < neighbor_counts.len() {
            counts[neighbor_counts[i] as usize] = true;
            i += 1;
        }
        Self { name, when_alive, counts }
    }

    pub fn matches(&self, alive: bool, neighbors: u8) -> bool {
        self.when_alive == alive && self.counts.get(neighbors as usize).copied().unwrap_or(false)
    }

    fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.iter().enumerate().filter(|(_, on)| **on).map(|(n, _)| n)
    }
}

pub const SURVIVAL: Rule = Rule::new("survival", true, &[2, 3]);
pub const BIRTH: Rule = Rule::new("birth", false, &[3]);
pub const HIGH_LIFE_BIRTH: Rule = Rule::new("highlife birth", false, &[6]);

/// Rules in precedence order; the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    spontaneous_birth: Option<f64>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Conway's B3/S23.
    pub fn standard() -> Self {
        Self { rules: vec![SURVIVAL, BIRTH], spontaneous_birth: None }
    }

    pub fn from_config(config: &LifeConfig) -> Self {
        let mut rules = Self::standard();
        if config.high_life {
            rules = rules.with_rule(HIGH_LIFE_BIRTH);
        }
        if let Some(p) = config.spontaneous_birth {
            rules = rules.with_spontaneous_birth(p);
        }
        rules
    }

    /// Appends a rule below the existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_spontaneous_birth(mut self, probability: f64) -> Self {
        self.spontaneous_birth = Some(probability);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn spontaneous_birth(&self) -> Option<f64> {
        self.spontaneous_birth
    }

    /// Deterministic part of the transition. Living cells no rule keeps die outright.
    pub fn judge(&self, alive: bool, neighbors: u8) -> Verdict {
        if self.rules.iter().any(|rule| rule.matches(alive, neighbors)) {
            Verdict::Alive
        } else if !alive && self.spontaneous_birth.is_some() {
            Verdict::Open
        } else {
            Verdict::Dead
        }
    }

    /// Final state. Only `Open` cells consume a draw from `rng`.
    pub fn resolve<R: Rng + ?Sized>(&self, verdict: Verdict, rng: &mut R) -> bool {
        match (verdict, self.spontaneous_birth) {
            (Verdict::Alive, _) => true,
            (Verdict::Open, Some(p)) => rng.r#gen::<f64>() < p,
            _ => false,
        }
    }
}

/// Rulestring form, e.g. `B36/S23`, plus the spontaneous rate when set.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |when_alive: bool| -> String {
            let mut counts: Vec<usize> = self
                .rules
                .iter()
                .filter(|rule| rule.when_alive == when_alive)
                .flat_map(|rule| rule.counts())
                .collect();
            counts.sort_unstable();
            counts.dedup();
            counts.iter().map(|n| n.to_string()).collect()
        };
        write!(f, "B{}/S{}", digits(false), digits(true))?;
        if let Some(p) = self.spontaneous_birth {
            write!(f, " +spontaneous {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Counts how many draws were taken and always returns the same word.
    struct CountingRng {
        word: u64,
        draws: usize,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.word as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.word
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            dest.fill(self.word as u8);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn standard_table() {
        let rules = RuleSet::standard();
        for n in 0..=8 {
            let survives = rules.judge(true, n) == Verdict::Alive;
            let born = rules.judge(false, n) == Verdict::Alive;
            assert_eq!(survives, n == 2 || n == 3, "survival at {n}");
            assert_eq!(born, n == 3, "birth at {n}");
        }
    }

    #[test]
    fn high_life_adds_birth_on_six_only() {
        let rules = RuleSet::standard().with_rule(HIGH_LIFE_BIRTH);
        assert_eq!(rules.judge(false, 6), Verdict::Alive);
        assert_eq!(rules.judge(true, 6), Verdict::Dead);
        assert_eq!(rules.judge(false, 3), Verdict::Alive);
        assert_eq!(rules.to_string(), "B36/S23");
    }

    #[test]
    fn spontaneous_birth_never_saves_a_dying_cell() {
        let rules = RuleSet::standard().with_spontaneous_birth(1.0);
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert_eq!(rules.judge(true, n), Verdict::Dead);
            assert_eq!(rules.judge(false, n), Verdict::Open);
        }
    }

    #[test]
    fn only_open_cells_draw() {
        let rules = RuleSet::standard().with_spontaneous_birth(1.0);
        let mut rng = CountingRng { word: 0, draws: 0 };
        assert!(rules.resolve(Verdict::Alive, &mut rng));
        assert!(!rules.resolve(Verdict::Dead, &mut rng));
        assert_eq!(rng.draws, 0);
        assert!(rules.resolve(Verdict::Open, &mut rng));
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn zero_probability_never_births() {
        let rules = RuleSet::standard().with_spontaneous_birth(0.0);
        let mut rng = CountingRng { word: 0, draws: 0 };
        assert!(!rules.resolve(Verdict::Open, &mut rng));
    }

    #[test]
    fn from_config_builds_variants() {
        let config = LifeConfig {
            high_life: true,
            spontaneous_birth: Some(0.5),
            ..LifeConfig::default()
        };
        let rules = RuleSet::from_config(&config);
        assert_eq!(rules.rules(), &[SURVIVAL, BIRTH, HIGH_LIFE_BIRTH]);
        assert_eq!(rules.spontaneous_birth(), Some(0.5));
        assert_eq!(RuleSet::from_config(&LifeConfig::default()), RuleSet::standard());
    }
}
