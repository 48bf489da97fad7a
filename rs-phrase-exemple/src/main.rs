use rs_phrase_core::loader::{DictionaryLoader, FileDictionaryLoader};
use rs_phrase_core::model::generator::PhraseGenerator;
use rs_phrase_core::model::phrase_input::PhraseInput;
use rs_phrase_core::model::template::{ConjunctionRole, Template};
use rs_phrase_core::model::word::{Plurality, Tense};
use rs_phrase_core::mutator::{
    ConstantMutator, ConstantStyle, NumericMutator, NumericStyle, UppercaseMutator, UppercaseWordMutator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs are controlled with RUST_LOG (e.g. RUST_LOG=rs_phrase_core=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load the dictionary given on the command line, or the bundled demo one.
    // With the cache enabled, a .bin file is written next to it and reused
    // until the JSON file changes
    let default_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../rs-phrase-core/data/english.json");
    let path = std::env::args().nth(1).unwrap_or_else(|| default_path.to_owned());
    let dictionary = FileDictionaryLoader::new(&path).with_cache(true).load()?;
    info!(path = %path, words = dictionary.len(), "dictionary ready");

    // The dictionary is only borrowed: any number of generators can share it
    let mut generator = PhraseGenerator::new(&dictionary);

    // "the brave owls watch a river quickly"
    let input = PhraseInput::new(vec![
        Template::Article { definite: true },
        Template::Adjective,
        Template::Noun { plurality: Plurality::Plural },
        Template::Verb { tense: Tense::Present, plurality: Plurality::Plural, transitive: Some(true) },
        Template::Article { definite: false },
        Template::Noun { plurality: Plurality::Singular },
        Template::Adverb,
    ]);

    // Without mutators the strength estimate is exact (up to repeated words)
    let strength = generator.strength(&input);
    println!("{} combinations, {:.1} bits", strength.combinations, strength.entropy_bits);
    for i in 0..5 {
        println!("Plain phrase {}: {}", i + 1, generator.generate(&input)?);
    }

    // Mutators are applied in order on the assembled phrase.
    // 'basic()' gives the usual settings, 'new()' picks the style
    let input = input
        .with_mutator(NumericMutator::basic())
        .with_mutator(UppercaseMutator::basic())
        .with_mutator(ConstantMutator::basic());
    for i in 0..5 {
        println!("Mutated phrase {}: {}", i + 1, generator.generate(&input)?);
    }

    // Mutators do not model their entropy: the estimate becomes NaN
    println!("Mutated strength: {:?}", generator.strength(&input).combinations);

    // A second sentence shape, with a conjunction between two clauses
    let input = PhraseInput::new(vec![
        Template::Pronoun { plurality: Plurality::Singular },
        Template::Verb { tense: Tense::Past, plurality: Plurality::Singular, transitive: Some(false) },
        Template::Conjunction { joins: ConjunctionRole::Phrases },
        Template::ProperNoun,
        Template::Verb { tense: Tense::Future, plurality: Plurality::Singular, transitive: None },
    ])
    .with_mutator(NumericMutator::new(NumericStyle::EndOfPhrase, 3))
    .with_mutator(UppercaseWordMutator::basic())
    .with_mutator(ConstantMutator::new(ConstantStyle::MiddleOfPhrase, ","));
    for i in 0..5 {
        println!("Clause phrase {}: {}", i + 1, generator.generate(&input)?);
    }

    // Configurations can also be read from JSON (see PhraseInput::from_file)
    let input = PhraseInput::from_json(
        r#"{
            "templates": [
                { "slot": "interrogative", "plurality": "plural" },
                { "slot": "noun", "plurality": "plural" },
                { "slot": "verb", "tense": "continuous", "plurality": "plural" }
            ],
            "mutators": [ { "mutator": "constant", "value": "?", "separator": "" } ]
        }"#,
    )?;
    println!("Question: {}", generator.generate(&input)?);

    // Invalid configurations are rejected before generation
    match PhraseInput::from_json(r#"{ "templates": [] }"#) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {}", e),
    }

    Ok(())
}
