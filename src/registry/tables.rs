//! GRI Disclosure Tables
//!
//! Static metadata for the GRI Standards assessment. Every other part of the
//! crate (schema, renderer, completion, report) derives from these tables.
//!
//! Contents:
//! - SECTIONS: universal standards (GRI 1-3) and all topic standards
//! - TOPIC_GROUPS: Economic (200), Environmental (300), Social (400)
//! - GRI2_SUBSECTIONS: five fixed groupings of GRI 2 by disclosure number
//! - DISCLOSURES: 122 disclosure definitions in report order

use super::{DisclosureDefinition, FieldType, Gri2Subsection, SectionMeta, TopicStandardGroup};

const fn section(id: &'static str, name: &'static str, description: &'static str) -> SectionMeta {
    SectionMeta { id, name, description }
}

/// Universal disclosure, always required.
const fn universal(code: &'static str, label: &'static str, section: &'static str) -> DisclosureDefinition {
    DisclosureDefinition {
        code,
        label,
        section,
        field_type: FieldType::Textarea,
        required: true,
        options: None,
        unit: None,
    }
}

/// Narrative topic disclosure (materiality-gated, optional at field level).
const fn narrative(code: &'static str, label: &'static str, section: &'static str) -> DisclosureDefinition {
    DisclosureDefinition {
        code,
        label,
        section,
        field_type: FieldType::Textarea,
        required: false,
        options: None,
        unit: None,
    }
}

/// Quantitative topic disclosure with a display unit.
const fn quantity(
    code: &'static str,
    label: &'static str,
    section: &'static str,
    unit: &'static str,
) -> DisclosureDefinition {
    DisclosureDefinition {
        code,
        label,
        section,
        field_type: FieldType::Number,
        required: false,
        options: None,
        unit: Some(unit),
    }
}

// ============================================================================
// SECTION METADATA
// ============================================================================

pub(crate) static SECTIONS: &[SectionMeta] = &[
    section("gri1", "GRI 1: Foundation 2021", "Reporting principles and requirements -- no disclosure fields"),
    section("gri2", "GRI 2: General Disclosures 2021", "30 disclosures covering organization, governance, strategy, and stakeholder engagement"),
    section("gri3", "GRI 3: Material Topics 2021", "Process for determining and managing material topics"),
    // Economic
    section("201", "GRI 201: Economic Performance 2016", "Direct economic value generated and distributed"),
    section("202", "GRI 202: Market Presence 2016", "Ratios of entry-level wage and local hiring"),
    section("203", "GRI 203: Indirect Economic Impacts 2016", "Infrastructure investments and significant indirect impacts"),
    section("204", "GRI 204: Procurement Practices 2016", "Proportion of spending on local suppliers"),
    section("205", "GRI 205: Anti-corruption 2016", "Operations assessed, communication, and confirmed incidents"),
    section("206", "GRI 206: Anti-competitive Behavior 2016", "Legal actions for anti-competitive behavior"),
    section("207", "GRI 207: Tax 2019", "Approach to tax, governance, stakeholder engagement, and country-by-country reporting"),
    // Environmental
    section("301", "GRI 301: Materials 2016", "Materials used by weight or volume"),
    section("302", "GRI 302: Energy 2016", "Energy consumption, intensity, and reduction"),
    section("303", "GRI 303: Water and Effluents 2018", "Water withdrawal, discharge, and consumption"),
    section("304", "GRI 304: Biodiversity 2016", "Operational sites in or near areas of high biodiversity value"),
    section("305", "GRI 305: Emissions 2016", "GHG emissions (Scope 1, 2, 3), intensity, and reductions"),
    section("306", "GRI 306: Waste 2020", "Waste generation, diversion, and disposal"),
    section("307", "GRI 307: Environmental Compliance 2016", "Non-compliance with environmental laws and regulations"),
    section("308", "GRI 308: Supplier Environmental Assessment 2016", "New suppliers screened and negative impacts in supply chain"),
    // Social
    section("401", "GRI 401: Employment 2016", "New employee hires, turnover, and benefits"),
    section("402", "GRI 402: Labor/Management Relations 2016", "Minimum notice periods for operational changes"),
    section("403", "GRI 403: Occupational Health and Safety 2018", "OHS management system, hazard identification, injury rates"),
    section("404", "GRI 404: Training and Education 2016", "Average training hours and skill development programs"),
    section("405", "GRI 405: Diversity and Equal Opportunity 2016", "Governance body and employee diversity"),
    section("406", "GRI 406: Non-discrimination 2016", "Incidents of discrimination and corrective actions"),
    section("407", "GRI 407: Freedom of Association and Collective Bargaining 2016", "Operations where rights may be at risk"),
    section("408", "GRI 408: Child Labor 2016", "Operations and suppliers at significant risk"),
    section("409", "GRI 409: Forced or Compulsory Labor 2016", "Operations and suppliers at significant risk"),
    section("410", "GRI 410: Security Practices 2016", "Security personnel trained in human rights"),
    section("411", "GRI 411: Rights of Indigenous Peoples 2016", "Incidents of violations involving indigenous peoples"),
    section("412", "GRI 412: Human Rights Assessment 2016", "Operations subject to human rights reviews"),
    section("413", "GRI 413: Local Communities 2016", "Operations with community engagement and impact assessments"),
    section("414", "GRI 414: Supplier Social Assessment 2016", "New suppliers screened and negative social impacts"),
    section("415", "GRI 415: Public Policy 2016", "Political contributions"),
    section("416", "GRI 416: Customer Health and Safety 2016", "Health and safety impact assessment of products/services"),
    section("417", "GRI 417: Marketing and Labeling 2016", "Product and service information and labeling requirements"),
    section("418", "GRI 418: Customer Privacy 2016", "Substantiated complaints regarding customer privacy"),
    section("419", "GRI 419: Socioeconomic Compliance 2016", "Non-compliance with laws and regulations in the social and economic area"),
];

// ============================================================================
// TOPIC STANDARD GROUPS
// ============================================================================

pub(crate) static TOPIC_GROUPS: &[TopicStandardGroup] = &[
    TopicStandardGroup {
        name: "Economic",
        series: "200",
        standards: &["201", "202", "203", "204", "205", "206", "207"],
    },
    TopicStandardGroup {
        name: "Environmental",
        series: "300",
        standards: &["301", "302", "303", "304", "305", "306", "307", "308"],
    },
    TopicStandardGroup {
        name: "Social",
        series: "400",
        standards: &[
            "401", "402", "403", "404", "405", "406", "407", "408", "409", "410",
            "411", "412", "413", "414", "415", "416", "417", "418", "419",
        ],
    },
];

// ============================================================================
// GRI 2 SUBSECTIONS (by disclosure number)
// ============================================================================

pub(crate) static GRI2_SUBSECTIONS: &[Gri2Subsection] = &[
    Gri2Subsection { name: "The Organization", first: 1, last: 5 },
    Gri2Subsection { name: "Activities and Workers", first: 6, last: 8 },
    Gri2Subsection { name: "Governance", first: 9, last: 21 },
    Gri2Subsection { name: "Strategy, Policies and Practices", first: 22, last: 28 },
    Gri2Subsection { name: "Stakeholder Engagement", first: 29, last: 30 },
];

// ============================================================================
// DISCLOSURES
// ============================================================================

pub(crate) static DISCLOSURES: &[DisclosureDefinition] = &[
    // --- GRI 2: The Organization (2-1 to 2-5) ---
    universal("2-1", "Organizational details", "gri2"),
    universal("2-2", "Entities included in the organization's sustainability reporting", "gri2"),
    universal("2-3", "Reporting period, frequency and contact point", "gri2"),
    universal("2-4", "Restatements of information", "gri2"),
    universal("2-5", "External assurance", "gri2"),
    // --- GRI 2: Activities and Workers (2-6 to 2-8) ---
    universal("2-6", "Activities, value chain and other business relationships", "gri2"),
    universal("2-7", "Employees", "gri2"),
    universal("2-8", "Workers who are not employees", "gri2"),
    // --- GRI 2: Governance (2-9 to 2-21) ---
    universal("2-9", "Governance structure and composition", "gri2"),
    universal("2-10", "Nomination and selection of the highest governance body", "gri2"),
    universal("2-11", "Chair of the highest governance body", "gri2"),
    universal("2-12", "Role of the highest governance body in overseeing the management of impacts", "gri2"),
    universal("2-13", "Delegation of responsibility for managing impacts", "gri2"),
    universal("2-14", "Role of the highest governance body in sustainability reporting", "gri2"),
    universal("2-15", "Conflicts of interest", "gri2"),
    universal("2-16", "Communication of critical concerns", "gri2"),
    universal("2-17", "Collective knowledge of the highest governance body", "gri2"),
    universal("2-18", "Evaluation of the performance of the highest governance body", "gri2"),
    universal("2-19", "Remuneration policies", "gri2"),
    universal("2-20", "Process to determine remuneration", "gri2"),
    universal("2-21", "Annual total compensation ratio", "gri2"),
    // --- GRI 2: Strategy, Policies and Practices (2-22 to 2-28) ---
    universal("2-22", "Statement on sustainable development strategy", "gri2"),
    universal("2-23", "Policy commitments", "gri2"),
    universal("2-24", "Embedding policy commitments", "gri2"),
    universal("2-25", "Processes to remediate negative impacts", "gri2"),
    universal("2-26", "Mechanisms for seeking advice and raising concerns", "gri2"),
    universal("2-27", "Compliance with laws and regulations", "gri2"),
    universal("2-28", "Membership associations", "gri2"),
    // --- GRI 2: Stakeholder Engagement (2-29 to 2-30) ---
    universal("2-29", "Approach to stakeholder engagement", "gri2"),
    universal("2-30", "Collective bargaining agreements", "gri2"),

    // --- GRI 3: Material Topics 2021 ---
    universal("3-1", "Process to determine material topics", "gri3"),
    universal("3-2", "List of material topics", "gri3"),
    universal("3-3", "Management of material topics", "gri3"),

    // --- GRI 201: Economic Performance 2016 ---
    narrative("201-1", "Direct economic value generated and distributed", "201"),
    narrative("201-2", "Financial implications and other risks and opportunities due to climate change", "201"),
    narrative("201-3", "Defined benefit plan obligations and other retirement plans", "201"),
    narrative("201-4", "Financial assistance received from government", "201"),
    // --- GRI 202: Market Presence 2016 ---
    quantity("202-1", "Ratios of standard entry level wage by gender compared to local minimum wage", "202", "ratio"),
    quantity("202-2", "Proportion of senior management hired from the local community", "202", "%"),
    // --- GRI 203: Indirect Economic Impacts 2016 ---
    narrative("203-1", "Infrastructure investments and services supported", "203"),
    narrative("203-2", "Significant indirect economic impacts", "203"),
    // --- GRI 204: Procurement Practices 2016 ---
    quantity("204-1", "Proportion of spending on local suppliers", "204", "%"),
    // --- GRI 205: Anti-corruption 2016 ---
    narrative("205-1", "Operations assessed for risks related to corruption", "205"),
    narrative("205-2", "Communication and training about anti-corruption policies and procedures", "205"),
    narrative("205-3", "Confirmed incidents of corruption and actions taken", "205"),
    // --- GRI 206: Anti-competitive Behavior 2016 ---
    narrative("206-1", "Legal actions for anti-competitive behavior, anti-trust, and monopoly practices", "206"),
    // --- GRI 207: Tax 2019 ---
    narrative("207-1", "Approach to tax", "207"),
    narrative("207-2", "Tax governance, control, and risk management", "207"),
    narrative("207-3", "Stakeholder engagement and management of concerns related to tax", "207"),
    narrative("207-4", "Country-by-country reporting", "207"),

    // --- GRI 301: Materials 2016 ---
    quantity("301-1", "Materials used by weight or volume", "301", "metric tonnes"),
    quantity("301-2", "Recycled input materials used", "301", "%"),
    quantity("301-3", "Reclaimed products and their packaging materials", "301", "%"),
    // --- GRI 302: Energy 2016 ---
    quantity("302-1", "Energy consumption within the organization", "302", "GJ"),
    quantity("302-2", "Energy consumption outside of the organization", "302", "GJ"),
    quantity("302-3", "Energy intensity", "302", "GJ per unit"),
    quantity("302-4", "Reduction of energy consumption", "302", "GJ"),
    quantity("302-5", "Reductions in energy requirements of products and services", "302", "GJ"),
    // --- GRI 303: Water and Effluents 2018 ---
    narrative("303-1", "Interactions with water as a shared resource", "303"),
    narrative("303-2", "Management of water discharge-related impacts", "303"),
    quantity("303-3", "Water withdrawal", "303", "ML"),
    quantity("303-4", "Water discharge", "303", "ML"),
    quantity("303-5", "Water consumption", "303", "ML"),
    // --- GRI 304: Biodiversity 2016 ---
    narrative("304-1", "Operational sites owned, leased, managed in, or adjacent to, protected areas and areas of high biodiversity value outside protected areas", "304"),
    narrative("304-2", "Significant impacts of activities, products and services on biodiversity", "304"),
    narrative("304-3", "Habitats protected or restored", "304"),
    narrative("304-4", "IUCN Red List species and national conservation list species with habitats in areas affected by operations", "304"),
    // --- GRI 305: Emissions 2016 ---
    quantity("305-1", "Direct (Scope 1) GHG emissions", "305", "tCO2e"),
    quantity("305-2", "Energy indirect (Scope 2) GHG emissions", "305", "tCO2e"),
    quantity("305-3", "Other indirect (Scope 3) GHG emissions", "305", "tCO2e"),
    quantity("305-4", "GHG emissions intensity", "305", "tCO2e per unit"),
    quantity("305-5", "Reduction of GHG emissions", "305", "tCO2e"),
    quantity("305-6", "Emissions of ozone-depleting substances (ODS)", "305", "tonnes CFC-11 eq"),
    quantity("305-7", "Nitrogen oxides (NOx), sulfur oxides (SOx), and other significant air emissions", "305", "tonnes"),
    // --- GRI 306: Waste 2020 ---
    narrative("306-1", "Waste generation and significant waste-related impacts", "306"),
    narrative("306-2", "Management of significant waste-related impacts", "306"),
    quantity("306-3", "Waste generated", "306", "metric tonnes"),
    quantity("306-4", "Waste diverted from disposal", "306", "metric tonnes"),
    quantity("306-5", "Waste directed to disposal", "306", "metric tonnes"),
    // --- GRI 307: Environmental Compliance 2016 ---
    narrative("307-1", "Non-compliance with environmental laws and regulations", "307"),
    // --- GRI 308: Supplier Environmental Assessment 2016 ---
    quantity("308-1", "New suppliers that were screened using environmental criteria", "308", "%"),
    narrative("308-2", "Negative environmental impacts in the supply chain and actions taken", "308"),

    // --- GRI 401: Employment 2016 ---
    quantity("401-1", "New employee hires and employee turnover", "401", "count"),
    narrative("401-2", "Benefits provided to full-time employees that are not provided to temporary or part-time employees", "401"),
    narrative("401-3", "Parental leave", "401"),
    // --- GRI 402: Labor/Management Relations 2016 ---
    narrative("402-1", "Minimum notice periods regarding operational changes", "402"),
    // --- GRI 403: Occupational Health and Safety 2018 ---
    narrative("403-1", "Occupational health and safety management system", "403"),
    narrative("403-2", "Hazard identification, risk assessment, and incident investigation", "403"),
    narrative("403-3", "Occupational health services", "403"),
    narrative("403-4", "Worker participation, consultation, and communication on occupational health and safety", "403"),
    narrative("403-5", "Worker training on occupational health and safety", "403"),
    narrative("403-6", "Promotion of worker health", "403"),
    narrative("403-7", "Prevention and mitigation of occupational health and safety impacts directly linked by business relationships", "403"),
    quantity("403-8", "Workers covered by an occupational health and safety management system", "403", "%"),
    quantity("403-9", "Work-related injuries", "403", "rate"),
    quantity("403-10", "Work-related ill health", "403", "rate"),
    // --- GRI 404: Training and Education 2016 ---
    quantity("404-1", "Average hours of training per year per employee", "404", "hours"),
    narrative("404-2", "Programs for upgrading employee skills and transition assistance programs", "404"),
    quantity("404-3", "Percentage of employees receiving regular performance and career development reviews", "404", "%"),
    // --- GRI 405: Diversity and Equal Opportunity 2016 ---
    quantity("405-1", "Diversity of governance bodies and employees", "405", "%"),
    quantity("405-2", "Ratio of basic salary and remuneration of women to men", "405", "ratio"),
    // --- GRI 406: Non-discrimination 2016 ---
    narrative("406-1", "Incidents of discrimination and corrective actions taken", "406"),
    // --- GRI 407: Freedom of Association and Collective Bargaining 2016 ---
    narrative("407-1", "Operations and suppliers in which the right to freedom of association and collective bargaining may be at risk", "407"),
    // --- GRI 408: Child Labor 2016 ---
    narrative("408-1", "Operations and suppliers at significant risk for incidents of child labor", "408"),
    // --- GRI 409: Forced or Compulsory Labor 2016 ---
    narrative("409-1", "Operations and suppliers at significant risk for incidents of forced or compulsory labor", "409"),
    // --- GRI 410: Security Practices 2016 ---
    quantity("410-1", "Security personnel trained in human rights policies or procedures", "410", "%"),
    // --- GRI 411: Rights of Indigenous Peoples 2016 ---
    narrative("411-1", "Incidents of violations involving rights of indigenous peoples", "411"),
    // --- GRI 412: Human Rights Assessment 2016 ---
    quantity("412-1", "Operations that have been subject to human rights reviews or impact assessments", "412", "%"),
    quantity("412-2", "Employee training on human rights policies or procedures", "412", "hours"),
    narrative("412-3", "Significant investment agreements and contracts that include human rights clauses or that underwent human rights screening", "412"),
    // --- GRI 413: Local Communities 2016 ---
    quantity("413-1", "Operations with local community engagement, impact assessments, and development programs", "413", "%"),
    narrative("413-2", "Operations with significant actual and potential negative impacts on local communities", "413"),
    // --- GRI 414: Supplier Social Assessment 2016 ---
    quantity("414-1", "New suppliers that were screened using social criteria", "414", "%"),
    narrative("414-2", "Negative social impacts in the supply chain and actions taken", "414"),
    // --- GRI 415: Public Policy 2016 ---
    narrative("415-1", "Political contributions", "415"),
    // --- GRI 416: Customer Health and Safety 2016 ---
    quantity("416-1", "Assessment of the health and safety impacts of product and service categories", "416", "%"),
    narrative("416-2", "Incidents of non-compliance concerning the health and safety impacts of products and services", "416"),
    // --- GRI 417: Marketing and Labeling 2016 ---
    narrative("417-1", "Requirements for product and service information and labeling", "417"),
    narrative("417-2", "Incidents of non-compliance concerning product and service information and labeling", "417"),
    narrative("417-3", "Incidents of non-compliance concerning marketing communications", "417"),
    // --- GRI 418: Customer Privacy 2016 ---
    narrative("418-1", "Substantiated complaints concerning breaches of customer privacy and losses of customer data", "418"),
    // --- GRI 419: Socioeconomic Compliance 2016 ---
    narrative("419-1", "Non-compliance with laws and regulations in the social and economic area", "419"),
];
