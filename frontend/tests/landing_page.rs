use pretty_assertions::assert_eq;
use wanderlust_frontend::components::hero::HeroMode;
use wanderlust_frontend::components::reveal::IN_VIEW_CLASS;
use wanderlust_frontend::components::search::{SearchOutcome, ERROR_CLASS};
use wanderlust_frontend::host::fake::{FakeHost, NodeId, PlaybackBehaviour};
use wanderlust_frontend::host::{ConnectionHints, Display, Host, ListenTarget};
use wanderlust_frontend::{PageConfig, PageController};

struct Landing {
    host: FakeHost,
    hamburger: NodeId,
    nav_links: Vec<NodeId>,
    search_form: NodeId,
    search_input: NodeId,
    header: NodeId,
    hero_video: NodeId,
    hero_image: NodeId,
    user_button: NodeId,
    login_email: NodeId,
    cards: Vec<(NodeId, NodeId)>,
    benefit: NodeId,
}

fn landing() -> Landing {
    let host = FakeHost::new();
    let header = host.create_with_id("header", "header");
    let hamburger = host.create_with_id("button", "hamburger");
    let nav = host.create_with_id("nav", "nav-menu");
    let nav_links: Vec<_> = (0..3)
        .map(|_| {
            let link = host.create_in(nav, "a");
            host.add_class(&link, "nav-link");
            link
        })
        .collect();
    let user_button = host.create_with_id("button", "user-button");

    let hero = host.create_with_id("section", "hero");
    host.set_offset_height(hero, 720.0);
    let hero_video = host.create_with_id("video", "hero-video");
    let hero_image = host.create_with_id("img", "hero-image");
    let search_form = host.create_with_id("form", "search-form");
    let search_input = host.create_with_id("input", "search-input");

    let cards = ["lisbon", "kyoto", "cusco"]
        .iter()
        .map(|city| {
            let card = host.create("article");
            host.add_class(&card, "destination-card");
            host.set_attribute(&card, "data-src", &format!("/img/{}-large.jpg", city));
            let img = host.create_in(card, "img");
            (card, img)
        })
        .collect();
    let benefit = host.create("div");
    host.add_class(&benefit, "benefit-card");

    let modal = host.create_with_id("div", "login-modal");
    let backdrop = host.create_in(modal, "div");
    host.add_class(&backdrop, "modal-backdrop");
    let form = host.create_in(modal, "form");
    let login_email = host.create_in(form, "input");

    Landing {
        host,
        hamburger,
        nav_links,
        search_form,
        search_input,
        header,
        hero_video,
        hero_image,
        user_button,
        login_email,
        cards,
        benefit,
    }
}

fn mount(page: &Landing) -> PageController<FakeHost> {
    PageController::mount(page.host.clone(), &PageConfig::default()).unwrap()
}

#[test]
fn navigation_menu_round_trip() {
    let page = landing();
    let controller = mount(&page);

    page.host.click(page.hamburger);
    assert!(controller.nav_open());
    page.host.click(page.nav_links[2]);
    assert!(!controller.nav_open());
    assert_eq!(
        page.host.attribute(&page.hamburger, "aria-expanded").as_deref(),
        Some("false")
    );
}

#[test]
fn header_shades_past_the_hero() {
    let page = landing();
    let controller = mount(&page);
    assert!(!controller.header_scrolled());

    page.host.scroll_to(641.0);
    assert!(page.host.has_class(&page.header, "scrolled"));
    page.host.scroll_to(0.0);
    assert!(!controller.header_scrolled());
}

#[test]
fn search_validation_end_to_end() {
    let page = landing();
    let controller = mount(&page);

    page.host.set_value(page.search_input, "   ");
    page.host.submit(page.search_form);
    assert!(page.host.has_class(&page.search_input, ERROR_CLASS));
    assert!(page.host.alerts().is_empty());
    page.host.advance(700);
    assert!(!page.host.has_class(&page.search_input, ERROR_CLASS));

    page.host.set_value(page.search_input, "Paris");
    page.host.submit(page.search_form);
    assert_eq!(page.host.alerts(), vec!["Searching for: Paris".to_string()]);

    page.host.set_value(page.search_input, "Lima");
    assert_eq!(
        controller.search().submit(),
        SearchOutcome::Searched("Lima".to_string())
    );
    assert_eq!(page.host.alerts().len(), 2);
}

#[test]
fn profile_button_opens_modal_and_escape_closes() {
    let page = landing();
    let controller = mount(&page);

    page.host.click(page.user_button);
    assert!(controller.modal_open());
    assert_eq!(page.host.focused(), Some(page.login_email));
    assert!(page.host.navigations().is_empty());

    page.host.key_down(ListenTarget::Document, "Escape");
    assert!(!controller.modal_open());
}

#[test]
fn cards_reveal_and_load_once() {
    let page = landing();
    mount(&page);
    let (card, img) = page.cards[0];

    page.host.intersect(&[card, card, page.benefit]);
    assert!(page.host.has_class(&card, IN_VIEW_CLASS));
    assert!(page.host.has_class(&page.benefit, IN_VIEW_CLASS));
    assert_eq!(
        page.host.attribute(&img, "src").as_deref(),
        Some("/img/lisbon-large.jpg")
    );
    assert!(!page.host.is_observed(card));

    let (untouched, untouched_img) = page.cards[1];
    assert!(page.host.is_observed(untouched));
    assert_eq!(page.host.attribute(&untouched_img, "src"), None);
}

#[test]
fn hero_respects_reduced_motion() {
    let page = landing();
    page.host.set_reduced_motion(true);
    let controller = mount(&page);

    assert_eq!(page.host.play_calls(), 0);
    assert_eq!(page.host.display(page.hero_image), Some(Display::Block));
    assert_eq!(page.host.display(page.hero_video), Some(Display::None));
    assert_eq!(controller.hero_mode(), Some(HeroMode::Image));
}

#[test]
fn hero_plays_on_fast_connection() {
    let page = landing();
    page.host.set_connection(Some(ConnectionHints {
        save_data: false,
        effective_type: Some("4g".to_string()),
    }));
    let controller = mount(&page);
    page.host.settle_playback();
    assert_eq!(controller.hero_mode(), Some(HeroMode::Video));
}

#[test]
fn hero_falls_back_when_autoplay_blocked() {
    let page = landing();
    page.host
        .set_playback(PlaybackBehaviour::Reject("NotAllowedError".to_string()));
    let controller = mount(&page);
    page.host.settle_playback();
    assert_eq!(controller.hero_mode(), Some(HeroMode::Image));
}
