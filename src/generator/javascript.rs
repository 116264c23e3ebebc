//! Illustrative JavaScript snippets. The output is fixture text only and is
//! never evaluated.

use super::{GenerateContext, GeneratorKind, ValueGenerator};
use crate::error::Result;
use crate::names;
use rand::seq::IndexedRandom;
use serde_json::Value;

const IDENT: &str = "{ident}";

const SNIPPETS: &[&str] = &[
    "function {ident}(a, b) {\n  return a + b;\n}",
    "const {ident} = (items) => items.filter(Boolean).length;",
    "export class {ident} {\n  constructor(value) {\n    this.value = value;\n  }\n}",
    "let {ident} = 0;\nfor (let i = 0; i < 10; i++) {\n  {ident} += i;\n}",
    "async function {ident}(url) {\n  const res = await fetch(url);\n  return res.json();\n}",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct JavascriptGenerator;

impl ValueGenerator for JavascriptGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let snippet = SNIPPETS.choose(&mut *ctx.rng).copied().unwrap_or(SNIPPETS[0]);
        let ident = names::identifier(ctx.rng);
        Ok(Value::String(snippet.replace(IDENT, &ident)))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Javascript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::test_support::context;
    use crate::tracker::TrackerRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_placeholder_is_substituted() {
        let mut rng = StdRng::seed_from_u64(42);
        let trackers = TrackerRegistry::new();
        let record = Value::Null;
        let mut ctx = context(&mut rng, &record, &trackers);
        let mut generator = JavascriptGenerator;

        for _ in 0..20 {
            let value = generator.generate(&mut ctx).unwrap();
            let code = value.as_str().unwrap();
            assert!(!code.contains(IDENT));
            assert!(!code.is_empty());
        }
    }
}
