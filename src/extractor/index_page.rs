// src/extractor/index_page.rs

use super::naming::{clean_lecture_title, sort_sections, take_week_from_section};
use crate::{
    constants::index_page,
    error::*,
    models::{Course, Lecture, Resource, ResourceKind, Section},
};
use itertools::Itertools;
use log::{debug, trace, warn};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static COURSE_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(index_page::COURSE_TITLE_SELECTOR).unwrap());
static ITEM_LIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(index_page::ITEM_LIST_SELECTOR).unwrap());

/// `div.item_list` 的一个直接子元素
#[derive(Debug)]
enum IndexNode<'a> {
    SectionHeader(String),
    LectureList(ElementRef<'a>),
}

impl IndexNode<'_> {
    fn describe(&self) -> &'static str {
        match self {
            IndexNode::SectionHeader(_) => "小节标题",
            IndexNode::LectureList(_) => "讲座列表",
        }
    }
}

/// 解析讲座索引页，返回按 (周次, 页面顺序) 排好序的课程结构。
///
/// `page_url` 用于把相对的资源链接解析为绝对地址。
pub fn parse_index_page(html: &str, course_id: &str, page_url: &Url) -> AppResult<Course> {
    let document = Html::parse_document(html);

    let title = extract_course_title(&document).ok_or(AppError::TitleNotFound)?;
    debug!("课程标题: '{}'", title);

    let item_list = document
        .select(&ITEM_LIST_SELECTOR)
        .next()
        .ok_or_else(|| AppError::PageStructure("缺少讲座列表容器 (div.item_list)".into()))?;

    // 第一阶段：把子元素识别为带类型的节点
    let nodes = item_list
        .children()
        .filter_map(ElementRef::wrap)
        .map(classify_node)
        .collect::<AppResult<Vec<_>>>()?;

    if nodes.len() % 2 != 0 {
        return Err(AppError::PageStructure(format!(
            "小节标题与讲座列表无法一一配对 (共 {} 个元素)",
            nodes.len()
        )));
    }

    // 第二阶段：按位置两两配对
    let mut sections = nodes
        .into_iter()
        .tuples::<(_, _)>()
        .enumerate()
        .map(|(page_index, pair)| match pair {
            (IndexNode::SectionHeader(header), IndexNode::LectureList(list)) => {
                let (name, week) = take_week_from_section(&header);
                trace!("小节 #{}: '{}' (week {})", page_index, name, week);
                Ok(Section {
                    name,
                    week,
                    page_index,
                    lectures: extract_lectures(list, page_url),
                })
            }
            (first, second) => Err(AppError::PageStructure(format!(
                "第 {} 组元素应为 小节标题+讲座列表，实际为 {}+{}",
                page_index + 1,
                first.describe(),
                second.describe()
            ))),
        })
        .collect::<AppResult<Vec<_>>>()?;

    sort_sections(&mut sections);
    debug!("共解析出 {} 个小节", sections.len());

    Ok(Course {
        id: course_id.to_string(),
        title,
        sections,
    })
}

fn extract_course_title(document: &Html) -> Option<String> {
    document
        .select(&COURSE_TITLE_SELECTOR)
        .find_map(|img| img.value().attr("alt"))
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
}

fn classify_node(element: ElementRef<'_>) -> AppResult<IndexNode<'_>> {
    match element.value().name() {
        "ul" | "ol" => Ok(IndexNode::LectureList(element)),
        tag => child_elements(element, "h3")
            .next()
            .map(|h3| IndexNode::SectionHeader(own_text(h3)))
            .ok_or_else(|| {
                AppError::PageStructure(format!("无法识别的元素 <{}>，其中没有小节标题 <h3>", tag))
            }),
    }
}

/// 讲座标题来自 `li > a`，资源链接来自 `li > div.item_resource > a`。
///
/// 资源链接在整个列表内统一编号：第 k 个链接属于第 k / 4 个讲座，类型为 k mod 4。
fn extract_lectures(list: ElementRef<'_>, page_url: &Url) -> Vec<Lecture> {
    let items: Vec<ElementRef<'_>> = child_elements(list, "li").collect();

    let mut lectures: Vec<Lecture> = items
        .iter()
        .flat_map(|li| child_elements(*li, "a"))
        .enumerate()
        .map(|(i, anchor)| Lecture {
            title: clean_lecture_title(&own_text(anchor)),
            ordinal: i + 1,
            resources: Vec::new(),
        })
        .collect();

    let hrefs = items
        .iter()
        .flat_map(|li| child_elements(*li, "div"))
        .filter(|div| {
            div.value()
                .classes()
                .any(|class| class == index_page::RESOURCE_CONTAINER_CLASS)
        })
        .flat_map(|div| child_elements(div, "a"))
        .filter_map(|a| a.value().attr("href"));

    for (k, href) in hrefs.enumerate() {
        let kind = ResourceKind::from_link_index(k);
        let Some(lecture) = lectures.get_mut(k / ResourceKind::ALL.len()) else {
            warn!("资源链接 #{} ({}) 没有对应的讲座，已忽略", k, href);
            continue;
        };
        match page_url.join(href.trim()) {
            Ok(url) => lecture.resources.push(Resource { kind, url }),
            Err(e) => warn!("无法解析资源链接 '{}': {}，已忽略", href, e),
        }
    }

    lectures
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

/// 元素自身的文本节点 (不含子元素中的文本)
fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://class.example.org/ml-001/lecture/index").unwrap()
    }

    fn page(body: &str) -> String {
        format!(
            r#"<html><body>
            <div id="course-logo-text"><a href="/ml-001"><img alt=" Machine Learning " src="logo.png"></a></div>
            <div class="item_list">{}</div>
            </body></html>"#,
            body
        )
    }

    fn lecture_item(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a href="{}">res</a>"#, l))
            .collect();
        format!(
            r#"<li><a class="lecture-link" href="lecture/view">{}</a><div class="item_resource">{}</div></li>"#,
            title, anchors
        )
    }

    #[test]
    fn test_resource_links_cycle_through_kinds_and_group_by_four() {
        let html = page(&format!(
            r#"<div class="course-item-list-header"><h3>Week One</h3></div><ul>{}{}</ul>"#,
            lecture_item("First", &["a.pdf", "b.pptx", "c.srt", "d.mp4"]),
            lecture_item("Second (5:00)", &["e.pdf"]),
        ));
        let course = parse_index_page(&html, "ml-001", &page_url()).unwrap();
        assert_eq!(course.title, "Machine Learning");
        assert_eq!(course.sections.len(), 1);

        let lectures = &course.sections[0].lectures;
        assert_eq!(lectures.len(), 2);
        assert_eq!(lectures[1].title, "Second");
        assert_eq!(lectures[1].ordinal, 2);

        let kinds: Vec<_> = lectures[0].resources.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ResourceKind::ALL.to_vec());
        assert_eq!(lectures[1].resources.len(), 1);
        assert_eq!(lectures[1].resources[0].kind, ResourceKind::Pdf);
        assert_eq!(
            lectures[1].resources[0].url.as_str(),
            "https://class.example.org/ml-001/lecture/e.pdf"
        );
    }

    #[test]
    fn test_missing_title_means_bad_session() {
        let html = r#"<html><body><div class="login">Please log in</div></body></html>"#;
        assert!(matches!(
            parse_index_page(html, "ml-001", &page_url()),
            Err(AppError::TitleNotFound)
        ));
    }

    #[test]
    fn test_unpaired_elements_are_rejected() {
        let html = page(r#"<div><h3>Lonely</h3></div>"#);
        assert!(matches!(
            parse_index_page(&html, "ml-001", &page_url()),
            Err(AppError::PageStructure(_))
        ));

        let html = page(r#"<ul></ul><div><h3>Swapped</h3></div>"#);
        assert!(matches!(
            parse_index_page(&html, "ml-001", &page_url()),
            Err(AppError::PageStructure(_))
        ));
    }

    #[test]
    fn test_links_without_lecture_are_dropped() {
        let html = page(&format!(
            r#"<div><h3>Only</h3></div><ul>{}<li><div class="item_resource"><a href="x.pdf"></a><a href="y.pptx"></a><a href="z.srt"></a><a href="w.mp4"></a><a href="orphan.pdf"></a></div></li></ul>"#,
            lecture_item("Solo", &[])
        ));
        let course = parse_index_page(&html, "ml-001", &page_url()).unwrap();
        let lectures = &course.sections[0].lectures;
        assert_eq!(lectures.len(), 1);
        assert_eq!(lectures[0].resources.len(), 4);
    }
}
