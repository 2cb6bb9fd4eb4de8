use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "web-recipe")]
#[command(version, about = "Everyday web helpers: HTML snippets, conversions, validation and web lookups")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// <img> tag with a site's favicon
    Favicon { url: String },

    /// <img> tag with a QR code
    Qr {
        data: String,
        #[arg(long, default_value_t = 150)]
        width: u32,
        #[arg(long, default_value_t = 150)]
        height: u32,
        #[arg(long)]
        secure: bool,
    },

    /// <img> tag with a Gravatar
    Gravatar {
        email: String,
        #[arg(long, default_value_t = 80)]
        size: u32,
        #[arg(long)]
        secure: bool,
    },

    /// <a> tag; e-mail addresses become mailto links
    Link {
        link: String,
        #[arg(default_value = "")]
        text: String,
    },

    /// Spell out a number in English
    Words {
        #[arg(allow_hyphen_values = true)]
        number: String,
    },

    /// Human readable duration
    Duration {
        seconds: f64,
        /// Spell numbers out
        #[arg(long)]
        words: bool,
    },

    /// `#ffffff` to `rgb(255, 255, 255)`
    Hex2rgb { color: String },

    /// `rgb(255, 255, 255)` to `#ffffff`
    Rgb2hex { color: String },

    Ordinal {
        #[arg(allow_hyphen_values = true)]
        number: i64,
    },

    /// Days in a month, current year by default
    Days { month: u32, year: Option<i32> },

    /// Byte count in B, KB, MB...
    Bytes { bytes: u64 },

    Password {
        #[arg(default_value_t = 8)]
        length: usize,
    },

    Encode {
        text: String,
        #[arg(long)]
        key: Option<String>,
    },

    Decode {
        text: String,
        #[arg(long)]
        key: Option<String>,
    },

    Shorten {
        text: String,
        max_length: usize,
        /// Cut without appending "..."
        #[arg(long)]
        no_ellipsis: bool,
        #[arg(long)]
        word_safe: bool,
    },

    ValidateUrl { url: String },

    ValidateEmail {
        address: String,
        /// Reject disposable-mail domains
        #[arg(long)]
        no_temp: bool,
        /// Skip the MX lookup
        #[arg(long)]
        skip_mx: bool,
    },

    Tinyurl { url: String },

    /// Follow a short link to its target
    Expand { url: String },

    /// Google keyword suggestions
    Suggest { keyword: String },

    /// First Wikipedia hit
    Wiki { keyword: String },

    /// Feed as JSON
    Rss { url: String },

    Pagerank { url: String },

    Alexa { domain: String },

    /// Replace media links with oEmbed HTML
    Embed {
        text: String,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },

    /// Fetch a URL and print the body
    Fetch {
        url: String,
        #[arg(long)]
        post: bool,
        /// key=value form field, repeatable
        #[arg(short, long = "data")]
        data: Vec<String>,
        /// "Name: value" header, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        no_follow: bool,
        /// Print transfer info instead of the body
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = CliConfig::try_parse_from(["web-recipe", "-v", "ordinal", "2", "--config", "r.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("r.toml")));
        assert!(matches!(cli.command, Command::Ordinal { number: 2 }));
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::try_parse_from(["web-recipe", "words", "-42.5"]).unwrap();
        assert!(matches!(cli.command, Command::Words { number } if number == "-42.5"));

        let cli = CliConfig::try_parse_from([
            "web-recipe", "fetch", "http://example.com", "--post", "-d", "a=1", "-H", "X-Test: yes",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch { post, data, headers, .. } => {
                assert!(post);
                assert_eq!(data, vec!["a=1"]);
                assert_eq!(headers, vec!["X-Test: yes"]);
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(CliConfig::try_parse_from(["web-recipe", "validate-url", "http://x.io"]).is_ok());
        assert!(CliConfig::try_parse_from(["web-recipe", "hex2rgb", "#fff"]).is_ok());
        assert!(CliConfig::try_parse_from(["web-recipe"]).is_err());
    }

    #[test]
    fn test_parse_shorten_keeps_ellipsis_by_default() {
        let cli = CliConfig::try_parse_from(["web-recipe", "shorten", "some long text", "4"]).unwrap();
        assert!(matches!(cli.command, Command::Shorten { no_ellipsis: false, .. }));

        let cli = CliConfig::try_parse_from([
            "web-recipe", "shorten", "some long text", "4", "--no-ellipsis",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Shorten { no_ellipsis: true, .. }));
    }
}
