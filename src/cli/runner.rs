//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ContainerConfig, PagerConfig, PostListConfig, SiteConfig};
use crate::controller::{load_all, PageAction, PagerController};
use crate::error::{Error, Result, ResultExt};
use crate::feed::BloggerFeed;
use crate::pagination::{build_controls, render_text, PageWindow};
use crate::posts::load_custom_posts;
use crate::theme::paged_title;
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Window {
                total,
                page,
                page_size,
                window,
            } => {
                self.window(total, page, page_size, window);
                Ok(())
            }
            Commands::Load { container } => self.load(container.as_deref()).await,
            Commands::Select { page, container } => {
                self.select(*page, container.as_deref()).await
            }
            Commands::Posts { list } => self.posts(list.as_deref()).await,
        }
    }

    /// Load the site configuration, applying command-line overrides.
    ///
    /// Without a config file a single pager and post list are derived from
    /// `--label` and `--posts`.
    fn site_config(&self) -> Result<SiteConfig> {
        let mut site = match (&self.cli.config, &self.cli.site_url) {
            (Some(path), _) => SiteConfig::from_file(path)?,
            (None, Some(site_url)) => SiteConfig::new(site_url),
            (None, None) => {
                return Err(Error::config(
                    "Site not specified (use --config or --site-url)",
                ))
            }
        };

        if let Some(site_url) = &self.cli.site_url {
            site.site_url.clone_from(site_url);
        }
        if let Some(url) = &self.cli.url {
            site.current_url = Some(url.clone());
        }

        if site.pagers.is_empty() {
            let mut container = ContainerConfig::new("pagination");
            container.label.clone_from(&self.cli.label);
            if let Some(posts) = self.cli.posts {
                container.posts = posts;
            }
            site.pagers.push(container);
        }

        if site.post_lists.is_empty() {
            let mut list = PostListConfig::new("posts");
            list.label.clone_from(&self.cli.label);
            if let Some(posts) = self.cli.posts {
                list.items = posts;
            }
            site.post_lists.push(list);
        }

        site.validate()?;
        Ok(site)
    }

    /// Feed client for the site
    fn feed(site: &SiteConfig) -> Result<BloggerFeed> {
        BloggerFeed::new(&site.base_url(), site.http.client_config())
    }

    /// Controller configs, optionally restricted to one container
    fn pager_configs(site: &SiteConfig, container: Option<&str>) -> Result<Vec<PagerConfig>> {
        match container {
            Some(name) => Ok(vec![PagerConfig::for_container(site, site.container(name)?)]),
            None => Ok(site.pager_configs()),
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Compute a window offline
    fn window(&self, total: &str, page: &str, page_size: &str, window: &str) {
        let window = PageWindow::from_strs(total, page, page_size, window);
        let controls = build_controls(&window);

        self.output_message(&json!({
            "type": "WINDOW",
            "window": window,
            "item_count": window.item_count(),
            "controls": render_text(&controls)
        }));
    }

    /// Load every pager and print its controls
    async fn load(&self, container: Option<&str>) -> Result<()> {
        let site = self.site_config()?;
        let feed = Self::feed(&site)?;

        let mut pagers: Vec<PagerController> = Self::pager_configs(&site, container)?
            .into_iter()
            .map(PagerController::new)
            .collect();

        info!(pagers = pagers.len(), site = %site.base_url(), "Loading pagers");
        let controls = load_all(&mut pagers, &feed).await;

        for (pager, controls) in pagers.iter().zip(controls) {
            self.output_message(&json!({
                "type": "PAGER",
                "name": pager.config().name,
                "state": pager.state(),
                "controls": render_text(&controls)
            }));
        }

        Ok(())
    }

    /// Load one pager and select a page
    async fn select(&self, page: u32, container: Option<&str>) -> Result<()> {
        let site = self.site_config()?;
        let feed = Self::feed(&site)?;

        let config = Self::pager_configs(&site, container)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::config("No pager containers configured"))?;
        let mut pager = PagerController::new(config);

        pager.load(&feed).await;
        if pager.state().window().is_none() {
            return Err(Error::not_ready(
                &pager.config().name,
                format!("no page window ({})", pager.state()),
            ));
        }

        let action = pager.select(page, &feed).await?;
        let title = match &action {
            Some(PageAction::Fetch { page, .. }) => Some(paged_title(
                &Self::document_title(&site, pager.config().label.as_deref()),
                &site.title_separator,
                &site.page_title,
                *page,
            )),
            _ => None,
        };

        self.output_message(&json!({
            "type": "SELECTION",
            "name": pager.config().name,
            "action": action,
            "title": title,
            "state": pager.state(),
            "controls": render_text(&pager.controls())
        }));

        Ok(())
    }

    /// Load custom post lists
    async fn posts(&self, list: Option<&str>) -> Result<()> {
        let site = self.site_config()?;
        let feed = Self::feed(&site)?;

        let lists: Vec<&PostListConfig> = match list {
            Some(name) => vec![site.post_list(name)?],
            None => site.post_lists.iter().collect(),
        };

        let mut rng = rand::rng();
        for config in lists {
            let collection = load_custom_posts(&feed, config, &mut rng)
                .await
                .with_context(|| format!("Post list '{}'", config.name))?;
            self.output_message(&json!({
                "type": "POSTS",
                "name": config.name,
                "collection": collection
            }));
        }

        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Title of the listing page: `{label}{sep}{blog}` or just the blog title
    fn document_title(site: &SiteConfig, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("{label}{}{}", site.title_separator, site.blog_title),
            None => site.blog_title.clone(),
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
