use std::str::FromStr;

use anuvad::languages;
use anuvad::provider::{ProviderId, ProviderRegistry};
use clap::{Arg, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("anuvad")
        .version("0.1.0")
        .about("Translate text between English and Indian languages")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target-lang")
                .help("Target language code (e.g. hi, ta, bn)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("source-lang")
                .long("source")
                .short('s')
                .help("Source language code (default: auto-detect)")
                .default_value("auto"),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .short('p')
                .help("Translation provider: deep, google, or mock")
                .default_value("deep"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show provider and confidence details")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches.get_one::<String>("text").unwrap();
    let target_lang = matches.get_one::<String>("target-lang").unwrap();
    let source_lang = matches.get_one::<String>("source-lang").unwrap();
    let provider_id = ProviderId::from_str(matches.get_one::<String>("provider").unwrap())?;
    let verbose = matches.get_flag("verbose");

    if !languages::is_supported(target_lang) {
        eprintln!("Unsupported target language '{}'. Supported codes:", target_lang);
        for lang in &languages::LANGUAGES {
            eprintln!("  {}  {}", lang.code, lang.name);
        }
        return Err("Unsupported target language".into());
    }

    let registry = ProviderRegistry::from_env()?;
    let provider = match registry.get(provider_id) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            if provider_id == ProviderId::Google {
                eprintln!("Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
                eprintln!("Or use --provider deep (free) or --provider mock");
            }
            return Err(e.into());
        }
    };

    let result = provider.translate(text, source_lang, target_lang).await?;

    if verbose {
        println!("{} → {}", source_lang, target_lang);
        println!("Provider: {}", provider.name());
        if let Some(confidence) = result.confidence {
            println!("Confidence: {:.2}", confidence);
        }
        if provider.is_mock() {
            println!("(mock output, not a real translation)");
        }
    }
    println!("{}", result.text);

    Ok(())
}
