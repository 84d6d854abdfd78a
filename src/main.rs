use client_gestures::components::App;

fn main() {
    client_gestures::util::init_logging();
    yew::Renderer::<App>::new().render();
}
