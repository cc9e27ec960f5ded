use yew::prelude::*;

use belly_diary_core::{month_groups, MonthGroup, Restaurant};

#[derive(Properties, PartialEq)]
pub(crate) struct CalendarViewProps {
    pub(crate) records: &'static [Restaurant],
    /// Emits the catalog index of the clicked entry.
    pub(crate) on_restaurant_click: Callback<usize>,
}

/// Month-grouped, reverse-chronological timeline over the same record
/// list the gallery shows. Undated records simply do not appear.
#[function_component(CalendarView)]
pub(crate) fn calendar_view(props: &CalendarViewProps) -> Html {
    let groups = month_groups(props.records);
    let sections: Html = groups
        .iter()
        .map(|group| render_month(group, props.records, &props.on_restaurant_click))
        .collect();
    html! {
        <div class="calendar-view">
            { sections }
        </div>
    }
}

fn render_month(
    group: &MonthGroup,
    records: &'static [Restaurant],
    on_click: &Callback<usize>,
) -> Html {
    let entries: Html = group
        .entries
        .iter()
        .filter_map(|entry| {
            let record = records.get(entry.index)?;
            let on_click = {
                let on_click = on_click.clone();
                let index = entry.index;
                Callback::from(move |_: MouseEvent| on_click.emit(index))
            };
            Some(html! {
                <div
                    key={format!("{}-{}", entry.index, record.name)}
                    class="timeline-entry"
                    onclick={on_click}
                >
                    <div class="timeline-dot" />
                    <div class="timeline-date-badge">
                        <span class="timeline-badge-month">{ entry.date.month_abbrev() }</span>
                        <span class="timeline-day">{ entry.date.day }</span>
                    </div>
                    <div class="timeline-content">
                        <div class="timeline-heading">
                            <div>
                                <h3 class="timeline-name">{ record.name }</h3>
                                <p class="timeline-kind">{ record.kind }</p>
                            </div>
                            <img
                                class="timeline-thumb"
                                src={record.image}
                                alt={record.name}
                            />
                        </div>
                        <p class="timeline-description">{ record.description }</p>
                    </div>
                </div>
            })
        })
        .collect();
    html! {
        <section class="timeline-month" key={group.label.clone()}>
            <h2 class="timeline-month-label">{ &group.label }</h2>
            <div class="timeline">
                { entries }
            </div>
        </section>
    }
}
