use notes_client::CategoryFilter;

pub fn run_categories() {
    for filter in CategoryFilter::tabs() {
        println!("{filter}");
    }
}
