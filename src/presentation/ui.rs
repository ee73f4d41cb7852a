use crate::application::{App, AppMode};
use crate::domain::{DetailTab, Profile, Theme, ThemeFilter};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

/// Colours for the light and dark display preference.
struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
}

impl Palette {
    fn for_app(app: &App) -> Self {
        if app.dark_mode() {
            Palette {
                background: Color::Black,
                text: Color::Gray,
                muted: Color::DarkGray,
                accent: Color::LightCyan,
            }
        } else {
            Palette {
                background: Color::Reset,
                text: Color::Reset,
                muted: Color::Gray,
                accent: Color::Cyan,
            }
        }
    }

    fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }
}

fn theme_color(theme: Option<Theme>) -> Color {
    match theme {
        Some(Theme::Blue) => Color::Blue,
        Some(Theme::Green) => Color::Green,
        Some(Theme::Dark) => Color::DarkGray,
        Some(Theme::Purple) => Color::Magenta,
        None => Color::White,
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let palette = Palette::for_app(app);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, &palette, chunks[0]);
    render_filter_bar(f, app, &palette, chunks[1]);
    render_profiles(f, app, &palette, chunks[2]);
    render_status_bar(f, app, &palette, chunks[3]);

    if let (Some(profile), Some(tab)) = (app.detail_profile(), app.active_tab()) {
        render_detail_popup(f, app, profile, tab, &palette);
    }

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let settings = app.settings();
    let mut subtitle = vec![Span::styled(
        settings.subtitle().to_string(),
        Style::default().fg(palette.muted),
    )];
    if let Some(course) = &settings.course {
        subtitle.push(Span::styled(format!(" · {}", course), Style::default().fg(palette.muted)));
    }
    if let Some(year) = &settings.year {
        subtitle.push(Span::styled(format!(" · {}", year), Style::default().fg(palette.muted)));
    }

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            settings.title().to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(subtitle),
    ]);
    f.render_widget(header, area);
}

fn render_filter_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(8),
        ])
        .split(area);

    let searching = matches!(app.mode, AppMode::Search);
    let search_text = if app.search_input.is_empty() && !searching {
        Span::styled("Search profiles... (/)", Style::default().fg(palette.muted))
    } else {
        Span::raw(app.search_input.clone())
    };
    let search_border = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(palette.muted)
    };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_border)
            .title("Search"),
    );
    f.render_widget(search, chunks[0]);

    if searching {
        let x = chunks[0].x + 1 + app.search_input[..app.cursor_position].chars().count() as u16;
        f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
    }

    let filter = app.view().theme_filter;
    let filter_color = match filter {
        ThemeFilter::All => palette.text,
        ThemeFilter::Only(theme) => theme_color(Some(theme)),
    };
    let theme = Paragraph::new(Span::styled(filter.label(), Style::default().fg(filter_color)))
        .block(Block::default().borders(Borders::ALL).title("Theme (t)"));
    f.render_widget(theme, chunks[1]);

    let mode_icon = if app.dark_mode() { "☀️" } else { "🌙" };
    let toggle = Paragraph::new(mode_icon)
        .block(Block::default().borders(Borders::ALL).title("d"));
    f.render_widget(toggle, chunks[2]);
}

fn profile_card<'a>(profile: &'a Profile, palette: &Palette) -> ListItem<'a> {
    let color = theme_color(profile.theme);

    let mut meta = Vec::new();
    if let Some(age) = &profile.age {
        meta.push(format!("Age: {}", age));
    }
    if let Some(office) = &profile.office {
        meta.push(office.clone());
    }

    let mut title = vec![
        Span::styled(
            profile.name.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(profile.role.as_str(), Style::default().fg(palette.accent)),
    ];
    if !meta.is_empty() {
        title.push(Span::styled(
            format!("  {}", meta.join(" · ")),
            Style::default().fg(palette.muted),
        ));
    }

    let hobbies: Vec<Span> = profile
        .hobbies
        .iter()
        .flat_map(|hobby| {
            [
                Span::styled(format!("[{}]", hobby), Style::default().fg(color)),
                Span::raw(" "),
            ]
        })
        .collect();

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::raw(profile.bio.as_str())),
        Line::from(hobbies),
        Line::from(""),
    ])
}

fn render_profiles(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let profiles = app.filtered_profiles();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Profiles ({}/{})", profiles.len(), app.profiles().len()));

    if profiles.is_empty() {
        let empty = Paragraph::new(Span::styled("No profiles found", Style::default().fg(palette.muted)))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = profiles
        .iter()
        .map(|profile| profile_card(profile, palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn labelled<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

fn section<'a>(title: &'a str, color: Color) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn detail_lines<'a>(profile: &'a Profile, tab: DetailTab, palette: &Palette) -> Vec<Line<'a>> {
    let color = theme_color(profile.theme);
    let mut lines = Vec::new();

    match tab {
        DetailTab::About => {
            lines.push(section("About", color));
            lines.push(Line::from(profile.bio.as_str()));
            let muted = Style::default().fg(palette.muted);
            if !profile.image.is_empty() {
                lines.push(Line::from(Span::styled(format!("Photo: {}", profile.image), muted)));
            }
            if let Some(cover) = &profile.cover_image {
                lines.push(Line::from(Span::styled(format!("Cover: {}", cover), muted)));
            }
            if let Some(quote) = &profile.quote {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("“{}”", quote),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            if let Some(pitch) = &profile.pitch {
                lines.push(Line::from(""));
                lines.push(section("Pitch", color));
                lines.push(Line::from(pitch.as_str()));
            }
            if let Some(work) = &profile.work {
                lines.push(Line::from(""));
                lines.push(section("Work", color));
                lines.push(Line::from(work.as_str()));
            }
            if !profile.hobbies.is_empty() {
                lines.push(Line::from(""));
                lines.push(section("Hobbies & Interests", color));
                lines.push(Line::from(profile.hobbies.join(" · ")));
            }
            if let Some(age) = &profile.age {
                lines.push(Line::from(""));
                lines.push(section("Additional Info", color));
                lines.push(Line::from(format!("Age: {}", age)));
            }
        }
        DetailTab::Skills => {
            lines.push(section("Skills", color));
            if profile.skills.is_empty() {
                lines.push(Line::from(Span::styled("No skills listed", Style::default().fg(palette.muted))));
            }
            for skill in &profile.skills {
                lines.push(Line::from(format!("• {}", skill)));
            }
        }
        DetailTab::Projects => {
            lines.push(section("Projects", color));
            if profile.projects.is_empty() {
                lines.push(Line::from(Span::styled("No projects listed", Style::default().fg(palette.muted))));
            }
            for project in &profile.projects {
                lines.push(Line::from(Span::styled(
                    project.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(project.description.as_str()));
                if !project.image.is_empty() {
                    lines.push(Line::from(Span::styled(
                        project.image.as_str(),
                        Style::default().fg(palette.muted),
                    )));
                }
                lines.push(Line::from(""));
            }
        }
        DetailTab::Contact => {
            lines.push(section("Contact Information", color));
            if !profile.has_contact_info() {
                lines.push(Line::from(Span::styled("No contact details", Style::default().fg(palette.muted))));
            }
            if let Some(email) = &profile.email {
                lines.push(labelled("Email", email));
            }
            if let Some(phone) = &profile.phone {
                lines.push(labelled("Phone", phone));
            }
            if let Some(office) = &profile.office {
                lines.push(labelled("Office", office));
            }
            if let Some(location) = &profile.location {
                lines.push(labelled("Location", location));
            }
            for (network, url) in &profile.social {
                lines.push(labelled(network, url));
            }
        }
    }

    lines
}

fn render_detail_popup(f: &mut Frame, app: &App, profile: &Profile, tab: DetailTab, palette: &Palette) {
    let popup_area = centered_rect(f.area(), 80, 80);
    f.render_widget(Clear, popup_area);

    let color = theme_color(profile.theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} - {} ", profile.name, profile.role))
        .style(palette.base());
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<Line> = DetailTab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(tab.index())
        .highlight_style(Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, chunks[0]);

    let body = Paragraph::new(detail_lines(profile, tab, palette))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(body, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let input_text = match app.mode {
        AppMode::Browse => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.view().is_detail_open() {
                format!(
                    "#{} | Tab/←→: switch tab | ↑↓: scroll | y: copy email | Esc: close | [ ]: back/forward",
                    app.current_fragment()
                )
            } else {
                format!(
                    "#{} | Enter: view | /: search | t: theme | d: dark mode | Ctrl+E: export CSV | ?: help | q: quit",
                    app.current_fragment()
                )
            }
        }
        AppMode::Search => format!("Search: {} (Enter to keep, Esc to clear)", app.search_input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Browse => palette.base(),
            AppMode::Search => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Smoelenboek Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"SMOELENBOEK KEY BINDINGS

=== PROFILE LIST ===
↑↓ or j/k       Move between profile cards
Home/End, g/G   Jump to first/last card
Enter           Open the selected profile
/               Search name, role, bio and skills
t               Cycle theme filter (All, Blue, Green, Dark, Purple)
0-4             Pick theme filter directly (0 = All)
d               Toggle dark mode (remembered between sessions)
Ctrl+E          Export the visible profiles to CSV
q               Quit

=== SEARCH ===
Type            Filter as you type (case-insensitive)
Enter           Keep the search and return to the list
Esc             Clear the search
↑↓              Move the selection while searching

=== PROFILE DETAIL ===
Tab / → / l     Next tab (About, Skills, Projects, Contact)
Shift+Tab / ← / h Previous tab
1-4             Jump to a tab
↑↓ or j/k       Scroll the tab contents
y               Copy the email address to the clipboard
Esc             Close the detail view

=== HISTORY ===
[ or Alt+←      Back
] or Alt+→      Forward
                Every opened or closed profile is a history entry,
                like the #home and #profile/<id> fragments in a browser.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Profiles are re-fetched every refresh interval while the terminal has focus."#;
