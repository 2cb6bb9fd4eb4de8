use anyhow::Context;
use clap::Parser;
use web_recipe::core::html::{self, GravatarOptions};
use web_recipe::core::{cipher, convert, duration, numbers, text, validate};
use web_recipe::utils::{logger, validation::Validate};
use web_recipe::{
    Attributes, CliConfig, Command, CurlClient, DnsMxResolver, EmailValidator, FetchRequest,
    Fetcher, RecipeConfig, WebRecipes,
};

/// Nothing to print: an empty lookup or a failed check.
const EXIT_EMPTY: i32 = 2;

fn load_config(cli: &CliConfig) -> anyhow::Result<RecipeConfig> {
    let config = match &cli.config {
        Some(path) => RecipeConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => RecipeConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn verdict(ok: bool) -> Option<String> {
    ok.then(|| "valid".to_string())
}

fn build_fetch_request(
    url: String,
    post: bool,
    data: &[String],
    headers: &[String],
    user: Option<String>,
    password: Option<String>,
    no_follow: bool,
) -> anyhow::Result<FetchRequest> {
    let mut request = if post {
        FetchRequest::post(url)
    } else {
        FetchRequest::get(url)
    };

    if !data.is_empty() {
        let pairs = data
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .with_context(|| format!("form field '{}' is not key=value", pair))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        request = request.with_form(pairs);
    }

    for header in headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("header '{}' is not 'Name: value'", header))?;
        request = request.with_header(name.trim(), value.trim());
    }

    if let (Some(user), Some(password)) = (user, password) {
        request = request.with_basic_auth(user, password);
    }
    if no_follow {
        request = request.without_redirects();
    }
    Ok(request)
}

async fn run(cli: CliConfig, config: RecipeConfig) -> anyhow::Result<Option<String>> {
    let none = Attributes::new();

    let output = match cli.command {
        Command::Favicon { url } => Some(html::favicon(&url, &none)),
        Command::Qr {
            data,
            width,
            height,
            secure,
        } => Some(html::qr_code(&data, width, height, &none, secure)),
        Command::Gravatar {
            email,
            size,
            secure,
        } => {
            let options = GravatarOptions {
                size,
                ..GravatarOptions::default()
            };
            Some(html::gravatar(&email, &options, &none, secure))
        }
        Command::Link { link, text } => Some(html::link_tag(&link, &text, &none)),
        Command::Words { number } => Some(numbers::number_to_word(&number)?),
        Command::Duration { seconds, words } => Some(duration::seconds_to_text(seconds, words)),
        Command::Hex2rgb { color } => Some(convert::hex_to_rgb(&color)?),
        Command::Rgb2hex { color } => convert::css_rgb_to_hex(&color),
        Command::Ordinal { number } => Some(numbers::ordinal(number)),
        Command::Days { month, year } => {
            anyhow::ensure!((1..=12).contains(&month), "month must be between 1 and 12");
            Some(numbers::days_in_month(month, year).to_string())
        }
        Command::Bytes { bytes } => Some(numbers::bytes_to_human_readable_size(bytes)),
        Command::Password { length } => Some(text::generate_random_password(length)),
        Command::Encode { text, key } => Some(cipher::simple_encode(&text, key.as_deref())),
        Command::Decode { text, key } => Some(cipher::simple_decode(&text, key.as_deref())?),
        Command::Shorten {
            text,
            max_length,
            no_ellipsis,
            word_safe,
        } => Some(text::shorten_string(&text, max_length, !no_ellipsis, word_safe)),
        Command::ValidateUrl { url } => verdict(validate::validate_url(&url)),
        Command::ValidateEmail {
            address,
            no_temp,
            skip_mx,
        } => {
            let mut validator = EmailValidator::from_config(DnsMxResolver::new(), &config.email)?;
            if skip_mx {
                validator = validator.without_mx_check();
            }
            verdict(validator.validate(&address, !no_temp).await)
        }
        command => {
            let client = CurlClient::new(&config.http)?;
            let web = WebRecipes::with_endpoints(client, config.endpoints.clone());
            match command {
                Command::Tinyurl { url } => web.tiny_url(&url).await,
                Command::Expand { url } => web.expand_short_url(&url).await,
                Command::Suggest { keyword } => {
                    web.keyword_suggestions(&keyword).await.map(|s| s.join("\n"))
                }
                Command::Wiki { keyword } => match web.wiki_search(&keyword).await {
                    Some(entry) => Some(serde_json::to_string_pretty(&entry)?),
                    None => None,
                },
                Command::Rss { url } => match web.rss_reader(&url).await {
                    Some(feed) => Some(serde_json::to_string_pretty(&feed)?),
                    None => None,
                },
                Command::Pagerank { url } => {
                    web.google_page_rank(&url).await.map(|rank| rank.to_string())
                }
                Command::Alexa { domain } => {
                    web.alexa_rank(&domain).await.map(|rank| rank.to_string())
                }
                Command::Embed {
                    text,
                    width,
                    height,
                } => Some(web.auto_embed(&text, width, height).await),
                Command::Fetch {
                    url,
                    post,
                    data,
                    headers,
                    user,
                    password,
                    no_follow,
                    info,
                } => {
                    let request =
                        build_fetch_request(url, post, &data, &headers, user, password, no_follow)?;
                    let response = web.fetcher().fetch(&request).await?;
                    if info {
                        Some(format!("{:#?}", response.info))
                    } else {
                        Some(response.contents)
                    }
                }
                other => anyhow::bail!("unhandled command {:?}", other),
            }
        }
    };

    Ok(output.filter(|out| !out.is_empty()))
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match run(cli, config).await {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {
            tracing::debug!("no result");
            std::process::exit(EXIT_EMPTY);
        }
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    }
}
